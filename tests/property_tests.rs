// 貸出期間と料金計算のプロパティテスト

use car_rental_reservation::domain::model::{
    Car, CarRentalCompany, CarType, RentalPeriod, ReservationConstraints,
};

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use std::collections::HashSet;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

proptest! {
    /// 開始日が終了日より前なら期間は常に作成でき、日数はその差と一致する
    #[test]
    fn period_valid_when_start_before_end(offset in 0i64..3650, len in 1i64..365) {
        let start = base_date() + Duration::days(offset);
        let end = start + Duration::days(len);
        let period = RentalPeriod::new(start, end).unwrap();
        prop_assert_eq!(period.days(), len);
    }

    /// 開始日が終了日以降なら期間は作成できない
    #[test]
    fn period_invalid_when_start_not_before_end(offset in 0i64..3650, len in 0i64..365) {
        let end = base_date() + Duration::days(offset);
        let start = end + Duration::days(len);
        prop_assert!(RentalPeriod::new(start, end).is_err());
    }

    /// 既存予約の端の日に触れる期間は常に利用不可になる
    #[test]
    fn touching_reserved_endpoint_always_blocks(
        offset in 0i64..3650,
        reserved_len in 1i64..90,
        requested_len in 1i64..90,
    ) {
        let start = base_date() + Duration::days(offset);
        let reserved = RentalPeriod::new(start, start + Duration::days(reserved_len)).unwrap();

        let from_end = RentalPeriod::new(
            reserved.end(),
            reserved.end() + Duration::days(requested_len),
        ).unwrap();
        prop_assert!(reserved.blocks(&from_end));

        let until_start = RentalPeriod::new(
            reserved.start() - Duration::days(requested_len),
            reserved.start(),
        ).unwrap();
        prop_assert!(reserved.blocks(&until_start));
    }

    /// 既存予約の終了日より後に始まる期間は利用を妨げられない
    #[test]
    fn period_after_reserved_end_never_blocks(
        offset in 0i64..3650,
        reserved_len in 1i64..90,
        gap in 1i64..30,
        requested_len in 1i64..90,
    ) {
        let start = base_date() + Duration::days(offset);
        let reserved = RentalPeriod::new(start, start + Duration::days(reserved_len)).unwrap();

        let after_start = reserved.end() + Duration::days(gap);
        let after = RentalPeriod::new(
            after_start,
            after_start + Duration::days(requested_len),
        ).unwrap();
        prop_assert!(!reserved.blocks(&after));
    }

    /// 見積もり料金は常に「1日あたり料金 × 貸出日数」
    #[test]
    fn quote_price_is_daily_rate_times_days(
        len in 1i64..365,
        price_cents in 1u32..50_000,
    ) {
        let price_per_day = f64::from(price_cents) / 100.0;
        let car_type = CarType::new("economy".to_string(), 4, 120.0, price_per_day, false);
        let company = CarRentalCompany::new(
            "Hertz".to_string(),
            vec!["Brussels".to_string()],
            vec![Car::new(0, car_type)],
        );

        let period = RentalPeriod::new(base_date(), base_date() + Duration::days(len)).unwrap();
        let constraints = ReservationConstraints::new(period, "economy".to_string(), None);
        let quote = company.create_quote(&constraints, "Alice", &HashSet::new()).unwrap();

        prop_assert_eq!(quote.rental_price(), price_per_day * len as f64);
    }
}
