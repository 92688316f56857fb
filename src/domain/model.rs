// ドメインモデル（エンティティと値オブジェクト）

mod value_objects;
mod car_type;
mod car;
mod company;
mod quote;
mod reservation;
mod session;

pub use value_objects::{RentalPeriod, ReservationConstraints, ReservationId};

pub use car::Car;
pub use car_type::CarType;
pub use company::CarRentalCompany;
pub use quote::Quote;
pub use reservation::Reservation;
pub use session::RentalSession;
