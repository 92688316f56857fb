use crate::domain::error::DomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

/// 予約の一意識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(Uuid);

impl ReservationId {
    /// 新しい一意のReservationIdを生成
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

/// 貸出期間を表す値オブジェクト
/// 開始日は終了日より前である必要がある
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl RentalPeriod {
    /// 新しい貸出期間を作成
    ///
    /// # Arguments
    /// * `start` - 開始日
    /// * `end` - 終了日
    ///
    /// # Returns
    /// * `Ok(RentalPeriod)` - 作成成功
    /// * `Err(DomainError::InvalidPeriod)` - 開始日が終了日以降
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidPeriod(format!(
                "開始日は終了日より前である必要があります: {} >= {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// 開始日を取得
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// 終了日を取得
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// 貸出日数を取得
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// 指定された日付が期間内（両端を含む）にあるかチェック
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// この期間の予約が、要求された期間の利用を妨げるかチェック
    /// 要求期間の開始日または終了日が予約期間内（両端を含む）に
    /// 含まれる場合、車両は利用不可とみなす
    pub fn blocks(&self, requested: &RentalPeriod) -> bool {
        self.contains(requested.start) || self.contains(requested.end)
    }
}

impl fmt::Display for RentalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// 見積もり作成時の条件を表す値オブジェクト
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationConstraints {
    period: RentalPeriod,
    car_type: String,
    region: Option<String>,
}

impl ReservationConstraints {
    /// 新しい条件を作成
    ///
    /// # Arguments
    /// * `period` - 貸出期間
    /// * `car_type` - 希望する車種名
    /// * `region` - 地域（任意。指定時は候補会社をその地域に限定）
    pub fn new(period: RentalPeriod, car_type: String, region: Option<String>) -> Self {
        Self {
            period,
            car_type,
            region,
        }
    }

    /// 貸出期間を取得
    pub fn period(&self) -> &RentalPeriod {
        &self.period
    }

    /// 車種名を取得
    pub fn car_type(&self) -> &str {
        &self.car_type
    }

    /// 地域を取得
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reservation_id_creation() {
        let id1 = ReservationId::new();
        let id2 = ReservationId::new();
        assert_ne!(id1, id2, "Each ReservationId should be unique");
    }

    #[test]
    fn test_rental_period_valid() {
        let period = RentalPeriod::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        assert_eq!(period.days(), 9);
    }

    #[test]
    fn test_rental_period_start_after_end_fails() {
        let result = RentalPeriod::new(date(2024, 1, 10), date(2024, 1, 1));
        assert!(result.is_err());
    }

    #[test]
    fn test_rental_period_start_equals_end_fails() {
        let result = RentalPeriod::new(date(2024, 1, 1), date(2024, 1, 1));
        assert!(result.is_err());
    }

    #[test]
    fn test_blocks_is_inclusive_at_both_endpoints() {
        let reserved = RentalPeriod::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();

        // 要求期間の開始日が予約の終了日に一致
        let touching_end = RentalPeriod::new(date(2024, 1, 10), date(2024, 1, 15)).unwrap();
        assert!(reserved.blocks(&touching_end));

        // 要求期間の終了日が予約の開始日に一致
        let touching_start = RentalPeriod::new(date(2023, 12, 25), date(2024, 1, 1)).unwrap();
        assert!(reserved.blocks(&touching_start));
    }

    #[test]
    fn test_blocks_disjoint_period_is_free() {
        let reserved = RentalPeriod::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        let after = RentalPeriod::new(date(2024, 1, 11), date(2024, 1, 20)).unwrap();
        assert!(!reserved.blocks(&after));
    }

    #[test]
    fn test_contains_inclusive() {
        let period = RentalPeriod::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        assert!(period.contains(date(2024, 1, 1)));
        assert!(period.contains(date(2024, 1, 10)));
        assert!(!period.contains(date(2024, 1, 11)));
    }
}
