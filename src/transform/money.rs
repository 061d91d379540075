//! Canonical price representation.
//!
//! Prices are held as integer centavos. CMS prices arrive in reais and
//! client API prices arrive in centavos; each boundary converts explicitly
//! and everything is rendered by [`Money::format_brl`].

/// An amount of Brazilian Real in centavos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// From an integer count of centavos (client API unit).
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// From a decimal amount of reais (CMS unit), rounded to the nearest
    /// centavo. Non-finite or out-of-range input yields `None`.
    pub fn from_reais(reais: f64) -> Option<Self> {
        let cents = (reais * 100.0).round();
        if !cents.is_finite() || cents.abs() > i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Render as `pt-BR` BRL: `R$ 1.234,56`, `-R$ 0,99`.
    pub fn format_brl(&self) -> String {
        let negative = self.0 < 0;
        let abs = self.0.unsigned_abs();
        let reais = abs / 100;
        let cents = abs % 100;

        let digits = reais.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        format!("{}R$ {},{:02}", if negative { "-" } else { "" }, grouped, cents)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_brl())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reais_formatting() {
        assert_eq!(Money::from_reais(1234.5).unwrap().format_brl(), "R$ 1.234,50");
        assert_eq!(Money::from_reais(0.1 + 0.2).unwrap().format_brl(), "R$ 0,30");
        assert_eq!(Money::from_reais(999.999).unwrap().format_brl(), "R$ 1.000,00");
    }

    #[test]
    fn test_cents_formatting() {
        assert_eq!(Money::from_cents(0).format_brl(), "R$ 0,00");
        assert_eq!(Money::from_cents(123456).format_brl(), "R$ 1.234,56");
        assert_eq!(Money::from_cents(5).format_brl(), "R$ 0,05");
        assert_eq!(Money::from_cents(100_000_000).format_brl(), "R$ 1.000.000,00");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(Money::from_cents(-99).format_brl(), "-R$ 0,99");
        assert_eq!(Money::from_cents(i64::MIN).cents(), i64::MIN);
        assert!(Money::from_cents(i64::MIN).format_brl().starts_with("-R$ 92.233.720.368.547.758,"));
    }

    #[test]
    fn test_non_finite_reais() {
        assert_eq!(Money::from_reais(f64::NAN), None);
        assert_eq!(Money::from_reais(f64::INFINITY), None);
        assert_eq!(Money::from_reais(1e30), None);
    }

    #[test]
    fn test_same_amount_from_both_units() {
        assert_eq!(Money::from_reais(1234.56), Some(Money::from_cents(123456)));
    }
}
