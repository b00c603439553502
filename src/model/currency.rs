use serde::{Deserialize, Serialize};

/// Supported invoice currencies. A closed set; anything else entering
/// through `from_code` resolves to USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Inr,
    Jpy,
    Cad,
    Aud,
}

impl Currency {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "EUR" => Currency::Eur,
            "GBP" => Currency::Gbp,
            "INR" => Currency::Inr,
            "JPY" => Currency::Jpy,
            "CAD" => Currency::Cad,
            "AUD" => Currency::Aud,
            _ => Currency::Usd,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Inr => "₹",
            Currency::Jpy => "¥",
            Currency::Cad => "C$",
            Currency::Aud => "A$",
        }
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Currency::from_code(&code)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_codes() {
        assert_eq!(Currency::from_code("EUR"), Currency::Eur);
        assert_eq!(Currency::from_code("jpy"), Currency::Jpy);
        assert_eq!(Currency::Cad.symbol(), "C$");
        assert_eq!(Currency::Aud.symbol(), "A$");
    }

    #[test]
    fn unknown_code_falls_back_to_usd() {
        assert_eq!(Currency::from_code("XYZ"), Currency::Usd);
        assert_eq!(Currency::from_code("").symbol(), "$");
    }
}
