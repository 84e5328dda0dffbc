//! Product input normalization shared by admin create and update paths.

use super::error::DomainError;

const MAX_ALCOHOL_PERCENT: f64 = 100.0;

/// Unvalidated product fields as submitted by an admin.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub wine_type: String,
    pub region: String,
    pub vintage: i32,
    pub price: f64,
    pub alcohol: f64,
    pub stock: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl ProductDraft {
    /// Trim text fields, collapse blank optionals to `None`, and reject values the
    /// catalog cannot display.
    ///
    /// Stock is passed through unchecked; negative counts are tolerated.
    pub fn normalized(self) -> Result<Self, DomainError> {
        let name = required_text(self.name, "name")?;
        let wine_type = required_text(self.wine_type, "type")?;
        let region = required_text(self.region, "region")?;

        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation(
                "price must be a non-negative number",
            ));
        }

        if !self.alcohol.is_finite() || !(0.0..=MAX_ALCOHOL_PERCENT).contains(&self.alcohol) {
            return Err(DomainError::validation(
                "alcohol must be a percentage between 0 and 100",
            ));
        }

        Ok(Self {
            name,
            wine_type,
            region,
            vintage: self.vintage,
            price: self.price,
            alcohol: self.alcohol,
            stock: self.stock,
            description: optional_text(self.description),
            image_url: optional_text(self.image_url),
        })
    }
}

fn required_text(value: String, field: &'static str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "  Merlot ".to_string(),
            wine_type: "Red".to_string(),
            region: "Bordeaux".to_string(),
            vintage: 2019,
            price: 12.5,
            alcohol: 13.5,
            stock: 10,
            description: Some("   ".to_string()),
            image_url: Some(" /static/merlot.png ".to_string()),
        }
    }

    #[test]
    fn trims_and_collapses_blank_optionals() {
        let normalized = draft().normalized().expect("valid draft");
        assert_eq!(normalized.name, "Merlot");
        assert_eq!(normalized.description, None);
        assert_eq!(normalized.image_url.as_deref(), Some("/static/merlot.png"));
    }

    #[test]
    fn rejects_blank_region() {
        let err = ProductDraft {
            region: " ".to_string(),
            ..draft()
        }
        .normalized()
        .expect_err("blank region");
        assert!(err.to_string().contains("region must not be empty"));
    }

    #[test]
    fn rejects_negative_or_non_finite_price() {
        for price in [-0.01, f64::NAN, f64::INFINITY] {
            let result = ProductDraft { price, ..draft() }.normalized();
            assert!(result.is_err(), "price {price} should be rejected");
        }
    }

    #[test]
    fn rejects_alcohol_outside_percentage_range() {
        assert!(ProductDraft { alcohol: 100.5, ..draft() }.normalized().is_err());
        assert!(ProductDraft { alcohol: -1.0, ..draft() }.normalized().is_err());
        assert!(ProductDraft { alcohol: 0.0, ..draft() }.normalized().is_ok());
    }

    #[test]
    fn negative_stock_is_tolerated() {
        let normalized = ProductDraft { stock: -3, ..draft() }
            .normalized()
            .expect("stock is not enforced");
        assert_eq!(normalized.stock, -3);
    }
}
