mod manager_service;
mod reservation_service;

pub use manager_service::ManagerService;
pub use reservation_service::ReservationSessionService;
