use crate::domain::error::DomainError;
use crate::domain::port::RepositoryError;

/// アプリケーション層のエラー型
/// 呼び出し側に対しては単一のエラー型として振る舞い、
/// 各失敗種別は人間可読なメッセージでのみ区別される
#[derive(Debug)]
pub enum ApplicationError {
    /// ドメインエラー（ビジネスルール違反）
    DomainError(DomainError),
    /// リポジトリエラー（永続化の失敗。生のエラーは外に漏らさない）
    StoreError(RepositoryError),
    /// 条件を満たす空き車両・会社がない
    NoCarsAvailable(String),
    /// 見積もりの一括確定に失敗（バッチ全体がロールバック済み）
    ConfirmationFailed(String),
    /// エンティティが見つからない
    NotFound(String),
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationError::DomainError(err) => write!(f, "Domain error: {}", err),
            ApplicationError::StoreError(err) => write!(f, "Store error: {}", err),
            ApplicationError::NoCarsAvailable(msg) => write!(f, "No available cars: {}", msg),
            ApplicationError::ConfirmationFailed(msg) => {
                write!(f, "Confirmation failed: {}", msg)
            }
            ApplicationError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl std::error::Error for ApplicationError {}

// From実装でエラー変換を簡潔に
impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        ApplicationError::DomainError(err)
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        ApplicationError::StoreError(err)
    }
}
