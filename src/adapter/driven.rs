// 駆動される側アダプター（リポジトリ実装など）

mod company_repository;
mod console_logger;
pub mod inventory_loader;
mod reservation_repository;

pub use company_repository::MySqlCompanyRepository;
pub use console_logger::ConsoleLogger;
pub use reservation_repository::MySqlReservationRepository;
