// 出力ポート
// ドメイン層が外部に依存する機能をトレイトとして定義
// アダプター層でこれらのトレイトを実装する

use crate::domain::model::{CarRentalCompany, RentalPeriod, Reservation};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

/// ロガートレイト
/// ログ出力を抽象化するポート
pub trait Logger: Send + Sync {
    /// 情報レベルのログを出力
    fn info(&self, component: &str, message: &str, context: Option<HashMap<String, String>>);

    /// 警告レベルのログを出力
    fn warn(&self, component: &str, message: &str, context: Option<HashMap<String, String>>);

    /// エラーレベルのログを出力
    fn error(&self, component: &str, message: &str, context: Option<HashMap<String, String>>);
}

/// リポジトリエラー型
/// リポジトリ操作で発生するエラーを表現する
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::enum_variant_names)]
pub enum RepositoryError {
    /// データベース接続に失敗
    ConnectionFailed(String),
    /// 操作に失敗
    OperationFailed(String),
    /// データの取得に失敗
    FetchFailed(String),
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            RepositoryError::OperationFailed(msg) => write!(f, "Operation failed: {}", msg),
            RepositoryError::FetchFailed(msg) => write!(f, "Fetch failed: {}", msg),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// レンタカー会社リポジトリトレイト
/// 会社集約の永続化を抽象化する
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// 会社を保存する（車両・車種・地域を含む）
    ///
    /// # Arguments
    /// * `company` - 保存する会社
    ///
    /// # Returns
    /// * `Ok(())` - 保存成功
    /// * `Err(RepositoryError)` - 保存失敗
    async fn save(&self, company: &CarRentalCompany) -> Result<(), RepositoryError>;

    /// 会社名で会社を検索する
    ///
    /// # Arguments
    /// * `name` - 検索する会社名
    ///
    /// # Returns
    /// * `Ok(Some(CarRentalCompany))` - 会社が見つかった
    /// * `Ok(None)` - 会社が見つからなかった
    /// * `Err(RepositoryError)` - 検索失敗
    async fn find_by_name(&self, name: &str) -> Result<Option<CarRentalCompany>, RepositoryError>;

    /// すべての会社を安定した列挙順で取得する
    /// 見積もり作成のfirst-fit選択はこの列挙順に依存する
    ///
    /// # Returns
    /// * `Ok(Vec<CarRentalCompany>)` - 会社のリスト
    /// * `Err(RepositoryError)` - 取得失敗
    async fn find_all(&self) -> Result<Vec<CarRentalCompany>, RepositoryError>;

    /// すべての会社名を取得する
    async fn find_all_names(&self) -> Result<Vec<String>, RepositoryError>;

    /// 指定された地域でサービスを提供する会社を取得する
    /// パラメータ化されたクエリで実装すること（文字列連結は不可）
    ///
    /// # Arguments
    /// * `region` - 地域名
    async fn find_by_region(
        &self,
        region: &str,
    ) -> Result<Vec<CarRentalCompany>, RepositoryError>;
}

/// 予約リポジトリトレイト
/// 予約の永続化と集計クエリを抽象化する
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// 予約のバッチを保存する
    /// 単一のストアトランザクションで実行され、全件が保存されるか
    /// 1件も保存されないかのいずれかになる
    ///
    /// # Arguments
    /// * `reservations` - 保存する予約のバッチ
    async fn save_all(&self, reservations: &[Reservation]) -> Result<(), RepositoryError>;

    /// 指定された会社で対象期間に利用不可な車両IDの集合を取得する
    /// 既存予約の期間（両端を含む）に対象期間の開始日または終了日が
    /// 含まれる車両が利用不可となる
    ///
    /// # Arguments
    /// * `company` - 会社名
    /// * `period` - 対象期間
    async fn unavailable_car_ids(
        &self,
        company: &str,
        period: &RentalPeriod,
    ) -> Result<HashSet<u32>, RepositoryError>;

    /// 借り手ごとの予約件数を取得する
    async fn counts_per_client(&self) -> Result<HashMap<String, u64>, RepositoryError>;

    /// 指定された借り手の予約件数を取得する（予約なしは0）
    async fn count_by_client(&self, client: &str) -> Result<u64, RepositoryError>;

    /// 指定された会社・車種の予約件数を取得する（予約なしは0）
    async fn count_for_car_type(
        &self,
        company: &str,
        car_type: &str,
    ) -> Result<u64, RepositoryError>;

    /// 指定された会社・年の車種ごとの予約件数を取得する
    /// 予約の開始日が対象年に含まれるものを数え、件数の降順で返す
    ///
    /// # Arguments
    /// * `company` - 会社名
    /// * `year` - 対象年
    async fn counts_per_car_type_in_year(
        &self,
        company: &str,
        year: i32,
    ) -> Result<Vec<(String, u64)>, RepositoryError>;

    /// 指定された会社・車両の予約件数を取得する（予約なしは0）
    async fn count_for_car(&self, company: &str, car_id: u32) -> Result<u64, RepositoryError>;
}
