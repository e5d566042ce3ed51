//! Domain input - the name being valued and its optional history

use crate::error::InputError;

/// Traffic statistics for a domain that already serves content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficStats {
    /// Monthly unique visitors
    pub monthly_visitors: u64,

    /// Fraction of single-page sessions [0.0, 1.0]
    pub bounce_rate: f64,

    /// Average session duration in seconds
    pub avg_session_secs: f64,
}

impl TrafficStats {
    /// Create traffic statistics
    pub fn new(monthly_visitors: u64, bounce_rate: f64, avg_session_secs: f64) -> Self {
        Self {
            monthly_visitors,
            bounce_rate,
            avg_session_secs,
        }
    }

    fn validate(&self) -> Result<(), InputError> {
        if !self.bounce_rate.is_finite() || !(0.0..=1.0).contains(&self.bounce_rate) {
            return Err(InputError::InvalidTraffic(format!(
                "bounce rate {} is outside [0, 1]",
                self.bounce_rate
            )));
        }
        if !self.avg_session_secs.is_finite() || self.avg_session_secs < 0.0 {
            return Err(InputError::InvalidTraffic(format!(
                "average session duration {} must be non-negative",
                self.avg_session_secs
            )));
        }
        Ok(())
    }
}

/// A domain name together with everything known about it
///
/// Built once by the caller and only read by the pipeline.
///
/// # Examples
///
/// ```
/// use domval_domain::DomainInput;
///
/// let domain = DomainInput::parse("Crypto.AI")
///     .with_price_history(vec![100.0, 150.0]);
/// assert_eq!(domain.tld(), "ai");
/// assert_eq!(domain.sld(), "crypto");
/// assert!(domain.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DomainInput {
    name: String,
    tld: String,
    registered_at: Option<u64>,
    price_history: Vec<f64>,
    previous_sales: Vec<f64>,
    traffic: Option<TrafficStats>,
}

impl DomainInput {
    /// Create a domain input with an explicit TLD
    pub fn new(name: impl Into<String>, tld: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_lowercase(),
            tld: tld.into().trim().trim_start_matches('.').to_lowercase(),
            registered_at: None,
            price_history: Vec::new(),
            previous_sales: Vec::new(),
            traffic: None,
        }
    }

    /// Create a domain input, taking the TLD from the name's last label
    pub fn parse(name: impl Into<String>) -> Self {
        let name = name.into();
        let tld = name.rsplit_once('.').map(|(_, tld)| tld.to_string()).unwrap_or_default();
        Self::new(name, tld)
    }

    /// Set the registration time (unix seconds)
    pub fn with_registered_at(mut self, registered_at: u64) -> Self {
        self.registered_at = Some(registered_at);
        self
    }

    /// Set the chronological price history
    pub fn with_price_history(mut self, prices: Vec<f64>) -> Self {
        self.price_history = prices;
        self
    }

    /// Set previously recorded sale prices
    pub fn with_previous_sales(mut self, sales: Vec<f64>) -> Self {
        self.previous_sales = sales;
        self
    }

    /// Set traffic statistics
    pub fn with_traffic(mut self, traffic: TrafficStats) -> Self {
        self.traffic = Some(traffic);
        self
    }

    /// Full, lower-cased domain name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level domain without the leading dot
    pub fn tld(&self) -> &str {
        &self.tld
    }

    /// Everything before the TLD, used for lexical analysis
    pub fn sld(&self) -> &str {
        self.name
            .strip_suffix(self.tld.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
            .filter(|rest| !rest.is_empty())
            .unwrap_or(self.name.as_str())
    }

    /// Registration time (unix seconds), if known
    pub fn registered_at(&self) -> Option<u64> {
        self.registered_at
    }

    /// Chronological price history
    pub fn price_history(&self) -> &[f64] {
        &self.price_history
    }

    /// Previously recorded sale prices
    pub fn previous_sales(&self) -> &[f64] {
        &self.previous_sales
    }

    /// Traffic statistics, if the domain serves content
    pub fn traffic(&self) -> Option<&TrafficStats> {
        self.traffic.as_ref()
    }

    /// Check the input contract
    ///
    /// Absent optional data is never an error. Only structurally malformed
    /// names, non-positive prices and out-of-range traffic are rejected.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.name.is_empty() {
            return Err(InputError::EmptyName);
        }

        let Some((_, last_label)) = self.name.rsplit_once('.') else {
            return Err(InputError::MissingTld(self.name.clone()));
        };

        if self.name.split('.').any(str::is_empty) {
            return Err(InputError::EmptyLabel(self.name.clone()));
        }

        if self.tld != last_label {
            return Err(InputError::TldMismatch {
                name: self.name.clone(),
                tld: self.tld.clone(),
            });
        }

        for (index, &value) in self.price_history.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(InputError::InvalidPrice { index, value });
            }
        }

        if let Some(traffic) = &self.traffic {
            traffic.validate()?;
        }

        Ok(())
    }
}
