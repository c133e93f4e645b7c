use crate::error::CoreError;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five user-editable calculator inputs.
///
/// Each variant carries the domain of its slider. The page shell clamps into
/// this domain before a value ever reaches the derivation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputField {
    DailyCalls,
    AfterHoursPct,
    AiAnswerRate,
    ConversionRate,
    AvgValue,
}

impl InputField {
    /// All fields, in the order the sliders are laid out on the page.
    pub const ALL: [InputField; 5] = [
        InputField::DailyCalls,
        InputField::AfterHoursPct,
        InputField::AiAnswerRate,
        InputField::ConversionRate,
        InputField::AvgValue,
    ];

    pub fn min(&self) -> Decimal {
        match self {
            InputField::AvgValue => dec!(10),
            _ => Decimal::ZERO,
        }
    }

    pub fn max(&self) -> Decimal {
        match self {
            InputField::DailyCalls => dec!(300),
            InputField::AvgValue => dec!(1000),
            _ => dec!(100),
        }
    }

    pub fn default_value(&self) -> Decimal {
        match self {
            InputField::DailyCalls => dec!(60),
            InputField::AfterHoursPct => dec!(30),
            InputField::AiAnswerRate => dec!(80),
            InputField::ConversionRate => dec!(8),
            InputField::AvgValue => dec!(120),
        }
    }

    /// Whether the field only accepts whole numbers.
    pub fn is_integer(&self) -> bool {
        matches!(self, InputField::DailyCalls)
    }

    /// Clamps `value` into this field's domain. Integer fields are rounded first.
    pub fn clamp(&self, value: Decimal) -> Decimal {
        let value = if self.is_integer() {
            value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        } else {
            value
        };
        value.max(self.min()).min(self.max())
    }

    /// Returns `true` if `value` lies inside the field's domain.
    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min()
            && value <= self.max()
            && (!self.is_integer() || value.fract().is_zero())
    }

    /// The slider label shown on the landing page.
    pub fn label(&self) -> &'static str {
        match self {
            InputField::DailyCalls => "Daily incoming calls",
            InputField::AfterHoursPct => "% of calls after-hours",
            InputField::AiAnswerRate => "AI answer rate (of after-hours)",
            InputField::ConversionRate => "Conversion rate (calls → appointment)",
            InputField::AvgValue => "Avg revenue per appointment",
        }
    }

    /// Unit rendered right after the slider's current value.
    pub fn suffix(&self) -> &'static str {
        match self {
            InputField::DailyCalls => "calls",
            InputField::AvgValue => "$",
            _ => "%",
        }
    }

    /// The wire name, as used in query strings and JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::DailyCalls => "dailyCalls",
            InputField::AfterHoursPct => "afterHoursPct",
            InputField::AiAnswerRate => "aiAnswerRate",
            InputField::ConversionRate => "conversionRate",
            InputField::AvgValue => "avgValue",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}
