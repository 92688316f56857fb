use crate::domain::model::CarType;
use serde::{Deserialize, Serialize};

/// 車両
/// idは会社内で一意（インベントリ読み込み時に0から連番で割り当て）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    id: u32,
    car_type: CarType,
}

impl Car {
    /// 新しい車両を作成
    ///
    /// # Arguments
    /// * `id` - 会社内で一意の車両ID
    /// * `car_type` - 車種
    pub fn new(id: u32, car_type: CarType) -> Self {
        Self { id, car_type }
    }

    /// 車両IDを取得
    pub fn id(&self) -> u32 {
        self.id
    }

    /// 車種を取得
    pub fn car_type(&self) -> &CarType {
        &self.car_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_creation() {
        let car_type = CarType::new("economy".to_string(), 4, 120.0, 35.0, false);
        let car = Car::new(0, car_type.clone());
        assert_eq!(car.id(), 0);
        assert_eq!(car.car_type(), &car_type);
    }
}
