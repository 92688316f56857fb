use crate::domain::error::DomainError;
use crate::domain::model::{Car, CarType, Quote, Reservation, ReservationConstraints};
use serde::{Deserialize, Serialize};

use std::collections::HashSet;

/// レンタカー会社集約
/// 自社の車両に関する料金と空き状況の判断をすべて担う
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRentalCompany {
    name: String,
    regions: Vec<String>,
    cars: Vec<Car>,
}

impl CarRentalCompany {
    /// 新しいレンタカー会社を作成
    ///
    /// # Arguments
    /// * `name` - 会社名（グローバルに一意）
    /// * `regions` - サービス提供地域
    /// * `cars` - 保有車両
    pub fn new(name: String, regions: Vec<String>, cars: Vec<Car>) -> Self {
        Self {
            name,
            regions,
            cars,
        }
    }

    /// 会社名を取得
    pub fn name(&self) -> &str {
        &self.name
    }

    /// サービス提供地域を取得
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// 保有車両を取得
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// 指定された地域でサービスを提供しているかチェック
    pub fn serves_region(&self, region: &str) -> bool {
        self.regions.iter().any(|r| r == region)
    }

    /// 保有車両から導出される車種の一覧を取得
    /// 車種名で重複を除き、車両の並び順を保つ
    pub fn all_types(&self) -> Vec<CarType> {
        let mut types: Vec<CarType> = Vec::new();
        for car in &self.cars {
            if !types.iter().any(|t| t.name() == car.car_type().name()) {
                types.push(car.car_type().clone());
            }
        }
        types
    }

    /// 車種名から車種を取得
    pub fn find_type(&self, car_type: &str) -> Option<&CarType> {
        self.cars
            .iter()
            .map(Car::car_type)
            .find(|t| t.name() == car_type)
    }

    /// 指定された車種の車両IDの一覧を取得
    pub fn car_ids_of_type(&self, car_type: &str) -> Vec<u32> {
        self.cars
            .iter()
            .filter(|c| c.car_type().name() == car_type)
            .map(Car::id)
            .collect()
    }

    /// 車両IDから車両を取得
    pub fn find_car(&self, car_id: u32) -> Option<&Car> {
        self.cars.iter().find(|c| c.id() == car_id)
    }

    /// 指定された車種の空き車両のうち最初の1台を取得
    ///
    /// # Arguments
    /// * `car_type` - 車種名
    /// * `unavailable` - 対象期間に利用不可な車両IDの集合
    pub fn first_available_car(
        &self,
        car_type: &str,
        unavailable: &HashSet<u32>,
    ) -> Option<&Car> {
        self.cars
            .iter()
            .filter(|c| c.car_type().name() == car_type)
            .find(|c| !unavailable.contains(&c.id()))
    }

    /// 指定された車種に空き車両があるかチェック
    pub fn has_available_car(&self, car_type: &str, unavailable: &HashSet<u32>) -> bool {
        self.first_available_car(car_type, unavailable).is_some()
    }

    /// 条件から見積もりを作成
    /// 料金は作成時点で確定される（1日あたり料金 × 貸出日数）
    ///
    /// # Arguments
    /// * `constraints` - 見積もり条件
    /// * `renter` - 借り手名
    /// * `unavailable` - 対象期間に利用不可な車両IDの集合
    ///
    /// # Returns
    /// * `Ok(Quote)` - 作成成功
    /// * `Err(DomainError)` - 地域外、未知の車種、または空き車両なし
    pub fn create_quote(
        &self,
        constraints: &ReservationConstraints,
        renter: &str,
        unavailable: &HashSet<u32>,
    ) -> Result<Quote, DomainError> {
        if let Some(region) = constraints.region() {
            if !self.serves_region(region) {
                return Err(DomainError::RegionNotServed(region.to_string()));
            }
        }

        let car_type = self
            .find_type(constraints.car_type())
            .ok_or_else(|| DomainError::UnknownCarType(constraints.car_type().to_string()))?;

        if !self.has_available_car(car_type.name(), unavailable) {
            return Err(DomainError::NoCarAvailable(format!(
                "会社 {} に車種 {} の空き車両がありません",
                self.name,
                car_type.name()
            )));
        }

        let price = car_type.rental_price_per_day() * constraints.period().days() as f64;

        Ok(Quote::new(
            renter.to_string(),
            *constraints.period(),
            self.name.clone(),
            car_type.name().to_string(),
            price,
        ))
    }

    /// 見積もりを予約へ確定
    /// 空き状況を再検証し、最初の空き車両のIDを割り当てる
    ///
    /// # Arguments
    /// * `quote` - 確定する見積もり
    /// * `unavailable` - 対象期間に利用不可な車両IDの集合
    ///
    /// # Returns
    /// * `Ok(Reservation)` - 確定成功
    /// * `Err(DomainError::NoCarAvailable)` - 空き車両がもうない
    pub fn confirm_quote(
        &self,
        quote: &Quote,
        unavailable: &HashSet<u32>,
    ) -> Result<Reservation, DomainError> {
        let car = self
            .first_available_car(quote.car_type(), unavailable)
            .ok_or_else(|| {
                DomainError::NoCarAvailable(format!(
                    "会社 {} に車種 {} の空き車両がありません",
                    self.name,
                    quote.car_type()
                ))
            })?;

        Ok(Reservation::new(quote.clone(), car.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RentalPeriod;
    use chrono::NaiveDate;

    fn period(start_day: u32, end_day: u32) -> RentalPeriod {
        RentalPeriod::new(
            NaiveDate::from_ymd_opt(2024, 1, start_day).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, end_day).unwrap(),
        )
        .unwrap()
    }

    fn sample_company() -> CarRentalCompany {
        let economy = CarType::new("economy".to_string(), 4, 120.0, 35.0, false);
        let premium = CarType::new("premium".to_string(), 5, 600.0, 120.0, true);
        CarRentalCompany::new(
            "Hertz".to_string(),
            vec!["Brussels".to_string(), "Antwerp".to_string()],
            vec![
                Car::new(0, economy.clone()),
                Car::new(1, economy),
                Car::new(2, premium),
            ],
        )
    }

    #[test]
    fn test_all_types_deduplicates_by_name() {
        let company = sample_company();
        let types = company.all_types();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].name(), "economy");
        assert_eq!(types[1].name(), "premium");
    }

    #[test]
    fn test_serves_region() {
        let company = sample_company();
        assert!(company.serves_region("Brussels"));
        assert!(!company.serves_region("Ghent"));
    }

    #[test]
    fn test_create_quote_computes_price_from_days() {
        let company = sample_company();
        let constraints =
            ReservationConstraints::new(period(1, 5), "economy".to_string(), None);
        let quote = company
            .create_quote(&constraints, "Alice", &HashSet::new())
            .unwrap();
        // 4日間 × 35.0
        assert_eq!(quote.rental_price(), 140.0);
        assert_eq!(quote.rental_company(), "Hertz");
    }

    #[test]
    fn test_create_quote_unknown_type_fails() {
        let company = sample_company();
        let constraints = ReservationConstraints::new(period(1, 5), "truck".to_string(), None);
        let result = company.create_quote(&constraints, "Alice", &HashSet::new());
        assert!(matches!(result, Err(DomainError::UnknownCarType(_))));
    }

    #[test]
    fn test_create_quote_region_not_served_fails() {
        let company = sample_company();
        let constraints = ReservationConstraints::new(
            period(1, 5),
            "economy".to_string(),
            Some("Ghent".to_string()),
        );
        let result = company.create_quote(&constraints, "Alice", &HashSet::new());
        assert!(matches!(result, Err(DomainError::RegionNotServed(_))));
    }

    #[test]
    fn test_create_quote_all_cars_taken_fails() {
        let company = sample_company();
        let constraints =
            ReservationConstraints::new(period(1, 5), "economy".to_string(), None);
        let unavailable: HashSet<u32> = [0, 1].into_iter().collect();
        let result = company.create_quote(&constraints, "Alice", &unavailable);
        assert!(matches!(result, Err(DomainError::NoCarAvailable(_))));
    }

    #[test]
    fn test_confirm_quote_assigns_first_free_car() {
        let company = sample_company();
        let constraints =
            ReservationConstraints::new(period(1, 5), "economy".to_string(), None);
        let quote = company
            .create_quote(&constraints, "Alice", &HashSet::new())
            .unwrap();

        let unavailable: HashSet<u32> = [0].into_iter().collect();
        let reservation = company.confirm_quote(&quote, &unavailable).unwrap();
        assert_eq!(reservation.car_id(), 1);
    }

    #[test]
    fn test_confirm_quote_without_free_car_fails() {
        let company = sample_company();
        let constraints =
            ReservationConstraints::new(period(1, 5), "economy".to_string(), None);
        let quote = company
            .create_quote(&constraints, "Alice", &HashSet::new())
            .unwrap();

        let unavailable: HashSet<u32> = [0, 1].into_iter().collect();
        let result = company.confirm_quote(&quote, &unavailable);
        assert!(matches!(result, Err(DomainError::NoCarAvailable(_))));
    }
}
