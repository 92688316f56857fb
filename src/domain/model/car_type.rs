use serde::{Deserialize, Serialize};

use std::fmt;

/// 車種
/// 会社内で名前により一意。作成後は不変
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarType {
    name: String,
    nb_of_seats: u32,
    trunk_space: f32,
    rental_price_per_day: f64,
    smoking_allowed: bool,
}

impl CarType {
    /// 新しい車種を作成
    ///
    /// # Arguments
    /// * `name` - 車種名
    /// * `nb_of_seats` - 定員
    /// * `trunk_space` - トランク容量
    /// * `rental_price_per_day` - 1日あたりの料金
    /// * `smoking_allowed` - 喫煙可否
    pub fn new(
        name: String,
        nb_of_seats: u32,
        trunk_space: f32,
        rental_price_per_day: f64,
        smoking_allowed: bool,
    ) -> Self {
        Self {
            name,
            nb_of_seats,
            trunk_space,
            rental_price_per_day,
            smoking_allowed,
        }
    }

    /// 車種名を取得
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 定員を取得
    pub fn nb_of_seats(&self) -> u32 {
        self.nb_of_seats
    }

    /// トランク容量を取得
    pub fn trunk_space(&self) -> f32 {
        self.trunk_space
    }

    /// 1日あたりの料金を取得
    pub fn rental_price_per_day(&self) -> f64 {
        self.rental_price_per_day
    }

    /// 喫煙可否を取得
    pub fn smoking_allowed(&self) -> bool {
        self.smoking_allowed
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Car type: {} \tseats: {} \ttrunk: {} \tprice/day: {:.2} \tsmoking: {}",
            self.name, self.nb_of_seats, self.trunk_space, self.rental_price_per_day,
            self.smoking_allowed
        )
    }
}
