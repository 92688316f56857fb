use crate::domain::model::RentalPeriod;
use serde::{Deserialize, Serialize};

use std::fmt;

/// 見積もり
/// 価格付きの未確定な予約意図。確定されるまでセッション内にのみ保持される
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    renter: String,
    period: RentalPeriod,
    rental_company: String,
    car_type: String,
    rental_price: f64,
}

impl Quote {
    /// 新しい見積もりを作成
    /// 価格と車種の割り当ては作成時点の空き状況から確定される
    pub fn new(
        renter: String,
        period: RentalPeriod,
        rental_company: String,
        car_type: String,
        rental_price: f64,
    ) -> Self {
        Self {
            renter,
            period,
            rental_company,
            car_type,
            rental_price,
        }
    }

    /// 借り手名を取得
    pub fn renter(&self) -> &str {
        &self.renter
    }

    /// 貸出期間を取得
    pub fn period(&self) -> &RentalPeriod {
        &self.period
    }

    /// レンタカー会社名を取得
    pub fn rental_company(&self) -> &str {
        &self.rental_company
    }

    /// 車種名を取得
    pub fn car_type(&self) -> &str {
        &self.car_type
    }

    /// 見積もり料金を取得
    pub fn rental_price(&self) -> f64 {
        self.rental_price
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quote for {} from {} to {} at {}\nCar type: {}\nTotal price: {:.2}",
            self.renter,
            self.period.start(),
            self.period.end(),
            self.rental_company,
            self.car_type,
            self.rental_price
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_quote_creation() {
        let period = RentalPeriod::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
        .unwrap();
        let quote = Quote::new(
            "Alice".to_string(),
            period,
            "Hertz".to_string(),
            "economy".to_string(),
            140.0,
        );
        assert_eq!(quote.renter(), "Alice");
        assert_eq!(quote.rental_company(), "Hertz");
        assert_eq!(quote.rental_price(), 140.0);
    }
}
