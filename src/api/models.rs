// Query parameter DTOs for the summary endpoint

use serde::Deserialize;

/// Query parameters accepted by `GET /info`.
#[derive(Debug, Default, Deserialize)]
pub struct InfoParams {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl InfoParams {
    /// Price bounds must be non-negative when present. Written as a negated
    /// `>=` so NaN bounds fail too.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(min) = self.min_price {
            if !(min >= 0.0) {
                return Err(format!("min_price must be >= 0, got {min}"));
            }
        }
        if let Some(max) = self.max_price {
            if !(max >= 0.0) {
                return Err(format!("max_price must be >= 0, got {max}"));
            }
        }
        Ok(())
    }

    /// An empty category string counts as no filter.
    pub fn category_filter(&self) -> Option<String> {
        self.category
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_validate() {
        assert!(InfoParams::default().validate().is_ok());
    }

    #[test]
    fn negative_min_price_is_rejected() {
        let params = InfoParams {
            min_price: Some(-1.0),
            ..InfoParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn negative_max_price_is_rejected() {
        let params = InfoParams {
            max_price: Some(-0.01),
            ..InfoParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn nan_bounds_are_rejected() {
        let params = InfoParams {
            min_price: Some(f64::NAN),
            ..InfoParams::default()
        };
        assert!(params.validate().is_err());

        let params = InfoParams {
            max_price: Some(f64::NAN),
            ..InfoParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn zero_bounds_are_allowed() {
        let params = InfoParams {
            min_price: Some(0.0),
            max_price: Some(0.0),
            ..InfoParams::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn empty_category_is_no_filter() {
        let params = InfoParams {
            category: Some(String::new()),
            ..InfoParams::default()
        };
        assert_eq!(params.category_filter(), None);

        let params = InfoParams {
            category: Some("Toys".to_string()),
            ..InfoParams::default()
        };
        assert_eq!(params.category_filter(), Some("Toys".to_string()));
    }
}
