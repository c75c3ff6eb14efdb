use serde::{Deserialize, Deserializer, Serialize};

/// Default bound on operand length, sign included.
pub const DEFAULT_MAX_OPERAND_LEN: usize = 100_000;

/// Configuration for the calculator module (`modules.calculator.config`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Page title rendered by the HTML form.
    #[serde(deserialize_with = "scalar_as_string")]
    pub title: String,
    /// Operands longer than this are rejected before parsing.
    pub max_operand_len: usize,
}

/// Accept any scalar as text. Env overrides such as `..._TITLE=2024` arrive
/// as numbers.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Signed(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    })
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            title: "Calculator".to_owned(),
            max_operand_len: DEFAULT_MAX_OPERAND_LEN,
        }
    }
}

impl CalculatorConfig {
    /// # Errors
    /// Returns an error if `max_operand_len` is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_operand_len == 0 {
            anyhow::bail!("calculator.max_operand_len must be greater than zero");
        }
        Ok(())
    }
}
