/// ドメイン層のエラー型
/// ビジネスルール違反を表現する
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 無効な貸出期間（例: 開始日が終了日以降）
    InvalidPeriod(String),
    /// 未知の車種名
    UnknownCarType(String),
    /// 会社が対象地域でサービスを提供していない
    RegionNotServed(String),
    /// 借り手名が既に設定されている（セッションごとに1回のみ設定可能）
    RenterAlreadySet,
    /// 条件を満たす空き車両がない
    NoCarAvailable(String),
    /// 無効な値
    InvalidValue(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidPeriod(msg) => write!(f, "Invalid rental period: {}", msg),
            DomainError::UnknownCarType(name) => write!(f, "Unknown car type: {}", name),
            DomainError::RegionNotServed(region) => write!(f, "Region not served: {}", region),
            DomainError::RenterAlreadySet => write!(f, "Renter name already set"),
            DomainError::NoCarAvailable(msg) => write!(f, "No car available: {}", msg),
            DomainError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
