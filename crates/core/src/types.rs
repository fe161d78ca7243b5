use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Length of an average year (365.25 days) in milliseconds.
pub const YEAR_MS: f64 = 365.25 * DAY_MS as f64;

/// A purchase event as delivered by the transactions feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub revenue_usd: f64,
    pub customer_id: String,
    /// Epoch milliseconds.
    pub transaction_time: i64,
    pub utm_source: AcquisitionSource,
    pub customer_metadata: CustomerMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerMetadata {
    /// Epoch milliseconds.
    pub birthday_time: i64,
    pub gender: Gender,
    pub country: String,
    pub device: DeviceType,
}

/// Marketing channel a transaction is attributed to (the `utm_source`).
///
/// Kept as an open, lowercase-normalised string: the set of channels is fixed
/// by the color palette, not by the type, so an unrecognised channel survives
/// deserialisation and is rejected when the palette is consulted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AcquisitionSource(String);

impl AcquisitionSource {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-facing label: the channel name with its first letter capitalised.
    pub fn display_name(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl From<String> for AcquisitionSource {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for AcquisitionSource {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<AcquisitionSource> for String {
    fn from(source: AcquisitionSource) -> Self {
        source.0
    }
}

impl fmt::Display for AcquisitionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    NotSpecified,
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "non_binary" => Ok(Gender::NonBinary),
            "not_specified" => Ok(Gender::NotSpecified),
            other => Err(format!("unknown gender '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Web,
    Mobile,
}

/// Customer age bucket at the moment of purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "Under 15")]
    Under15,
    #[serde(rename = "15-19")]
    From15To19,
    #[serde(rename = "20-29")]
    From20To29,
    #[serde(rename = "30-39")]
    From30To39,
    #[serde(rename = "40-49")]
    From40To49,
    #[serde(rename = "50+")]
    Over50,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 6] = [
        AgeGroup::Under15,
        AgeGroup::From15To19,
        AgeGroup::From20To29,
        AgeGroup::From30To39,
        AgeGroup::From40To49,
        AgeGroup::Over50,
    ];

    /// Buckets that always appear as target nodes of the demographic graph.
    /// "Under 15" is not among them.
    pub const GRAPH_TARGETS: [AgeGroup; 5] = [
        AgeGroup::From15To19,
        AgeGroup::From20To29,
        AgeGroup::From30To39,
        AgeGroup::From40To49,
        AgeGroup::Over50,
    ];

    /// Buckets the customer's age at purchase time. Upper bounds are
    /// exclusive. A purchase recorded before the birth date yields a negative
    /// age and lands in `Under15`; such records are not rejected. The offset
    /// is taken in `f64`, so any pair of epoch values maps to a bucket.
    pub fn classify(birthday_ms: i64, transaction_ms: i64) -> AgeGroup {
        let age = (transaction_ms as f64 - birthday_ms as f64) / YEAR_MS;
        if age < 15.0 {
            AgeGroup::Under15
        } else if age < 20.0 {
            AgeGroup::From15To19
        } else if age < 30.0 {
            AgeGroup::From20To29
        } else if age < 40.0 {
            AgeGroup::From30To39
        } else if age < 50.0 {
            AgeGroup::From40To49
        } else {
            AgeGroup::Over50
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Under15 => "Under 15",
            AgeGroup::From15To19 => "15-19",
            AgeGroup::From20To29 => "20-29",
            AgeGroup::From30To39 => "30-39",
            AgeGroup::From40To49 => "40-49",
            AgeGroup::Over50 => "50+",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgeGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        AgeGroup::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown age group '{wanted}'"))
    }
}

/// Range selector offered by the dashboard's time tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "all")]
    AllTime,
}

impl TimeRange {
    /// Span of the current period in days; `None` for the unbounded range.
    pub fn span_days(&self) -> Option<i64> {
        match self {
            TimeRange::Last7Days => Some(7),
            TimeRange::Last30Days => Some(30),
            TimeRange::AllTime => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Last7Days => "Last 7 Days",
            TimeRange::Last30Days => "Last 30 Days",
            TimeRange::AllTime => "All Time",
        }
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "7d" | "last7days" | "last7" => Ok(TimeRange::Last7Days),
            "30d" | "last30days" | "last30" => Ok(TimeRange::Last30Days),
            "all" | "alltime" => Ok(TimeRange::AllTime),
            other => Err(format!("unknown time range '{other}' (expected 7d, 30d or all)")),
        }
    }
}

/// A transaction paired with the age bucket computed for it during one
/// aggregation pass. Borrows the snapshot it was derived from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnrichedTransaction<'a> {
    #[serde(flatten)]
    pub transaction: &'a Transaction,
    pub age_group: AgeGroup,
}

impl<'a> EnrichedTransaction<'a> {
    pub fn new(transaction: &'a Transaction) -> Self {
        Self {
            transaction,
            age_group: AgeGroup::classify(
                transaction.customer_metadata.birthday_time,
                transaction.transaction_time,
            ),
        }
    }

    pub fn revenue(&self) -> f64 {
        self.transaction.revenue_usd
    }

    pub fn time(&self) -> i64 {
        self.transaction.transaction_time
    }

    pub fn source(&self) -> &AcquisitionSource {
        &self.transaction.utm_source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn years(n: f64) -> i64 {
        (n * YEAR_MS) as i64
    }

    #[test]
    fn test_classify_bucket_boundaries() {
        assert_eq!(AgeGroup::classify(0, years(14.99)), AgeGroup::Under15);
        assert_eq!(AgeGroup::classify(0, years(15.0)), AgeGroup::From15To19);
        assert_eq!(AgeGroup::classify(0, years(19.5)), AgeGroup::From15To19);
        assert_eq!(AgeGroup::classify(0, years(20.0)), AgeGroup::From20To29);
        assert_eq!(AgeGroup::classify(0, years(35.0)), AgeGroup::From30To39);
        assert_eq!(AgeGroup::classify(0, years(49.9)), AgeGroup::From40To49);
        assert_eq!(AgeGroup::classify(0, years(50.0)), AgeGroup::Over50);
        assert_eq!(AgeGroup::classify(0, years(90.0)), AgeGroup::Over50);
    }

    #[test]
    fn test_classify_uses_offsets_not_absolute_times() {
        let birth = -years(30.0);
        assert_eq!(AgeGroup::classify(birth, 0), AgeGroup::From30To39);
    }

    #[test]
    fn test_purchase_before_birth_is_under_15() {
        assert_eq!(AgeGroup::classify(years(10.0), 0), AgeGroup::Under15);
    }

    #[test]
    fn test_extreme_epoch_values_do_not_overflow() {
        assert_eq!(AgeGroup::classify(i64::MIN + 1, i64::MAX), AgeGroup::Over50);
        assert_eq!(AgeGroup::classify(i64::MAX, i64::MIN + 1), AgeGroup::Under15);
        assert_eq!(AgeGroup::classify(i64::MAX, i64::MIN), AgeGroup::Under15);
        assert_eq!(
            AgeGroup::classify(-5_000_000_000_000_000_000, 5_000_000_000_000_000_000),
            AgeGroup::Over50
        );
        assert_eq!(AgeGroup::classify(i64::MAX, i64::MAX), AgeGroup::Under15);
    }

    #[test]
    fn test_age_group_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&AgeGroup::Over50).unwrap();
        assert_eq!(json, "\"50+\"");
        let parsed: AgeGroup = serde_json::from_str("\"Under 15\"").unwrap();
        assert_eq!(parsed, AgeGroup::Under15);
        assert_eq!("20-29".parse::<AgeGroup>().unwrap(), AgeGroup::From20To29);
        assert!("60+".parse::<AgeGroup>().is_err());
    }

    #[test]
    fn test_source_is_normalised_and_capitalised() {
        let source = AcquisitionSource::new(" TikTok ");
        assert_eq!(source.as_str(), "tiktok");
        assert_eq!(source.display_name(), "Tiktok");
        assert_eq!(AcquisitionSource::new("").display_name(), "");
    }

    #[test]
    fn test_transaction_wire_shape() {
        let json = r#"{
            "transaction_id": "t-1",
            "revenue_usd": 42.5,
            "customer_id": "c-1",
            "transaction_time": 1700000000000,
            "utm_source": "Google",
            "customer_metadata": {
                "birthday_time": 631152000000,
                "gender": "female",
                "country": "US",
                "device": "mobile"
            }
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.utm_source.as_str(), "google");
        assert_eq!(txn.customer_metadata.gender, Gender::Female);
        assert_eq!(txn.customer_metadata.device, DeviceType::Mobile);

        let enriched = EnrichedTransaction::new(&txn);
        assert_eq!(enriched.age_group, AgeGroup::From30To39);
        let out = serde_json::to_value(enriched).unwrap();
        assert_eq!(out["age_group"], "30-39");
        assert_eq!(out["transaction_id"], "t-1");
    }

    #[test]
    fn test_time_range_names() {
        assert_eq!("7d".parse::<TimeRange>().unwrap(), TimeRange::Last7Days);
        assert_eq!("ALL".parse::<TimeRange>().unwrap(), TimeRange::AllTime);
        assert!("90d".parse::<TimeRange>().is_err());
        assert_eq!(TimeRange::Last30Days.label(), "Last 30 Days");
        assert_eq!(serde_json::to_string(&TimeRange::Last30Days).unwrap(), "\"30d\"");
        assert_eq!(TimeRange::AllTime.span_days(), None);
    }

    #[test]
    fn test_gender_parsing_accepts_ui_labels() {
        assert_eq!("Non-binary".parse::<Gender>().unwrap(), Gender::NonBinary);
        assert_eq!("Not specified".parse::<Gender>().unwrap(), Gender::NotSpecified);
        assert!("other".parse::<Gender>().is_err());
    }
}
