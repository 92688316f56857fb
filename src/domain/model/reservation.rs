use crate::domain::model::{Quote, RentalPeriod, ReservationId};
use serde::{Deserialize, Serialize};

use std::fmt;

/// 予約
/// 確定済みの見積もりに車両IDと予約IDを付与したもの。永続化され、
/// 作成後はキャンセル（削除）以外では変更されない
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    quote: Quote,
    car_id: u32,
}

impl Reservation {
    /// 見積もりから新しい予約を作成
    ///
    /// # Arguments
    /// * `quote` - 確定された見積もり
    /// * `car_id` - 割り当てられた車両ID
    pub fn new(quote: Quote, car_id: u32) -> Self {
        Self {
            id: ReservationId::new(),
            quote,
            car_id,
        }
    }

    /// 予約IDを取得
    pub fn id(&self) -> ReservationId {
        self.id
    }

    /// 借り手名を取得
    pub fn renter(&self) -> &str {
        self.quote.renter()
    }

    /// 貸出期間を取得
    pub fn period(&self) -> &RentalPeriod {
        self.quote.period()
    }

    /// レンタカー会社名を取得
    pub fn rental_company(&self) -> &str {
        self.quote.rental_company()
    }

    /// 車種名を取得
    pub fn car_type(&self) -> &str {
        self.quote.car_type()
    }

    /// 料金を取得
    pub fn rental_price(&self) -> f64 {
        self.quote.rental_price()
    }

    /// 割り当てられた車両IDを取得
    pub fn car_id(&self) -> u32 {
        self.car_id
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reservation for {} from {} to {} at {}\nCar type: {}\tCar: {}\nTotal price: {:.2}",
            self.renter(),
            self.period().start(),
            self.period().end(),
            self.rental_company(),
            self.car_type(),
            self.car_id,
            self.rental_price()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_quote() -> Quote {
        let period = RentalPeriod::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
        .unwrap();
        Quote::new(
            "Alice".to_string(),
            period,
            "Hertz".to_string(),
            "economy".to_string(),
            140.0,
        )
    }

    #[test]
    fn test_reservation_keeps_quote_data() {
        let quote = sample_quote();
        let reservation = Reservation::new(quote.clone(), 2);
        assert_eq!(reservation.renter(), quote.renter());
        assert_eq!(reservation.rental_company(), quote.rental_company());
        assert_eq!(reservation.car_type(), quote.car_type());
        assert_eq!(reservation.rental_price(), quote.rental_price());
        assert_eq!(reservation.car_id(), 2);
    }

    #[test]
    fn test_reservation_ids_are_unique() {
        let quote = sample_quote();
        let r1 = Reservation::new(quote.clone(), 0);
        let r2 = Reservation::new(quote, 1);
        assert_ne!(r1.id(), r2.id());
    }
}
