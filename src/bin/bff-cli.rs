use clap::{Parser, Subcommand};
use serde_json::Value;
use url::Url;

#[derive(Parser)]
#[command(name = "bff-cli")]
#[command(about = "Query a running course BFF from the terminal", long_about = None)]
struct Cli {
    #[arg(short, long, env = "BFF_URL", default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List course cards
    Courses {
        #[arg(long)]
        institution: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
        #[arg(long)]
        level: Option<String>,
    },
    /// Autocomplete cities or courses
    Autocomplete {
        /// `cities` or `courses`
        #[arg(long = "type")]
        kind: String,
        #[arg(short, long, default_value = "")]
        q: String,
    },
    /// Course details by slug
    Course {
        slug: String,
        #[arg(long)]
        institution: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        unit_id: Option<String>,
        #[arg(long)]
        sku: Option<String>,
    },
    /// Units offering a course
    Units {
        course: String,
        #[arg(long)]
        institution: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        city: String,
    },
    /// SEO entries for an institution
    Seo {
        institution_slug: String,
        #[arg(long)]
        no_cache: bool,
    },
    /// Liveness check
    Health,
}

fn push(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<impl ToString>) {
    if let Some(value) = value {
        params.push((key, value.to_string()));
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut params: Vec<(&'static str, String)> = Vec::new();
    let segments: Vec<String> = match cli.command {
        Commands::Courses {
            institution,
            location,
            page,
            per_page,
            level,
        } => {
            push(&mut params, "institution", institution);
            push(&mut params, "location", location);
            push(&mut params, "page", page);
            push(&mut params, "perPage", per_page);
            push(&mut params, "level", level);
            vec!["courses".to_string()]
        }
        Commands::Autocomplete { kind, q } => {
            params.push(("type", kind));
            params.push(("q", q));
            vec!["courses".to_string(), "autocomplete".to_string()]
        }
        Commands::Course {
            slug,
            institution,
            state,
            city,
            unit_id,
            sku,
        } => {
            push(&mut params, "institution", institution);
            push(&mut params, "state", state);
            push(&mut params, "city", city);
            push(&mut params, "unitId", unit_id);
            push(&mut params, "sku", sku);
            vec!["courses".to_string(), slug]
        }
        Commands::Units {
            course,
            institution,
            state,
            city,
        } => {
            params.push(("institution", institution));
            params.push(("state", state));
            params.push(("city", city));
            vec!["courses".to_string(), course, "units".to_string()]
        }
        Commands::Seo {
            institution_slug,
            no_cache,
        } => {
            params.push(("institutionSlug", institution_slug));
            if no_cache {
                params.push(("noCache", "true".to_string()));
            }
            vec!["seos".to_string()]
        }
        Commands::Health => vec!["health".to_string()],
    };

    let res = client
        .get(route_url(&cli.url, &segments)?)
        .query(&params)
        .send()
        .await?;
    print_response(res).await
}

/// Append percent-encoded path segments to the BFF base URL.
fn route_url(base: &str, segments: &[String]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| format!("base URL '{base}' cannot carry a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if let Some(cache) = res.headers().get(reqwest::header::CACHE_CONTROL) {
        eprintln!("Cache-Control: {}", cache.to_str().unwrap_or("<binary>"));
    }

    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: BFF returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_route_url_encodes_slug() {
        let url = route_url("http://localhost:3000", &segments(&["courses", "a/b?c#d"])).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/courses/a%2Fb%3Fc%23d");
    }

    #[test]
    fn test_route_url_keeps_base_path() {
        let url = route_url("http://bff.local/api/", &segments(&["courses", "DIR-01", "units"])).unwrap();
        assert_eq!(url.as_str(), "http://bff.local/api/courses/DIR-01/units");
    }

    #[test]
    fn test_route_url_rejects_non_base() {
        assert!(route_url("mailto:someone@example.com", &segments(&["health"])).is_err());
    }
}
