use crate::adapter::driven::inventory_loader;
use crate::application::ApplicationError;
use crate::domain::model::{CarRentalCompany, CarType};
use crate::domain::port::{CompanyRepository, Logger, ReservationRepository};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

/// 管理サービス
/// インベントリの読み込みと、予約に対する集計レポートを提供する。
/// レポート系操作はすべて副作用のない読み取り専用クエリであり、
/// 不正な会社名は「見つからない」として報告する（エラーにはしない）
pub struct ManagerService {
    company_repository: Arc<dyn CompanyRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    logger: Arc<dyn Logger>,
}

impl ManagerService {
    /// 新しい管理サービスを作成
    ///
    /// # Arguments
    /// * `company_repository` - 会社リポジトリ
    /// * `reservation_repository` - 予約リポジトリ
    /// * `logger` - ロガー
    pub fn new(
        company_repository: Arc<dyn CompanyRepository>,
        reservation_repository: Arc<dyn ReservationRepository>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            company_repository,
            reservation_repository,
            logger,
        }
    }

    /// データファイルからレンタカー会社を読み込んで永続化する
    ///
    /// # Arguments
    /// * `datafile` - 会社データファイルのパス
    ///
    /// # Returns
    /// * `Ok(String)` - 読み込まれた会社名
    /// * `Err(ApplicationError)` - ファイル不正またはストア障害
    pub async fn load_rental_company(&self, datafile: &Path) -> Result<String, ApplicationError> {
        let data = inventory_loader::load_company_data_file(datafile)
            .await
            .map_err(|e| {
                ApplicationError::NotFound(format!(
                    "会社データファイルを読み込めません: {}: {}",
                    datafile.display(),
                    e
                ))
            })?;

        let company = CarRentalCompany::new(data.name, data.regions, data.cars);
        self.company_repository.save(&company).await?;

        let mut context = HashMap::new();
        context.insert("company".to_string(), company.name().to_string());
        context.insert("file".to_string(), datafile.display().to_string());
        self.logger
            .info("manager", "レンタカー会社を読み込みました", Some(context));

        Ok(company.name().to_string())
    }

    /// 指定された会社の車種一覧を取得
    /// 会社が存在しない場合はNoneを返す
    pub async fn get_car_types(
        &self,
        company: &str,
    ) -> Result<Option<Vec<CarType>>, ApplicationError> {
        match self.company_repository.find_by_name(company).await? {
            Some(company) => Ok(Some(company.all_types())),
            None => {
                self.log_company_not_found(company);
                Ok(None)
            }
        }
    }

    /// 指定された会社・車種の車両ID一覧を取得
    /// 会社が存在しない場合はNoneを返す
    pub async fn get_car_ids(
        &self,
        company: &str,
        car_type: &str,
    ) -> Result<Option<BTreeSet<u32>>, ApplicationError> {
        match self.company_repository.find_by_name(company).await? {
            Some(company) => Ok(Some(company.car_ids_of_type(car_type).into_iter().collect())),
            None => {
                self.log_company_not_found(company);
                Ok(None)
            }
        }
    }

    /// 最優良クライアントの集合を取得
    /// 予約件数が全クライアント中の最大件数と等しいクライアントを
    /// すべて返す（同数はすべて含まれる）。予約が1件もない場合は空集合
    pub async fn get_best_clients(&self) -> Result<BTreeSet<String>, ApplicationError> {
        let counts = self.reservation_repository.counts_per_client().await?;

        let max = match counts.values().max() {
            Some(max) => *max,
            None => return Ok(BTreeSet::new()),
        };

        Ok(counts
            .into_iter()
            .filter(|(_, count)| *count == max)
            .map(|(client, _)| client)
            .collect())
    }

    /// 指定された会社・年で最も予約が多かった車種を取得
    /// 対象年に開始する予約を数え、最大件数の車種を返す。
    /// 同数の場合はクエリの最初の結果が選ばれる。
    /// 会社が存在しない、または対象年に予約がない場合はNone
    pub async fn get_most_popular_car_type_in(
        &self,
        company: &str,
        year: i32,
    ) -> Result<Option<CarType>, ApplicationError> {
        let counts = self
            .reservation_repository
            .counts_per_car_type_in_year(company, year)
            .await?;

        let most_popular = match counts.first() {
            Some((name, _)) => name.clone(),
            None => return Ok(None),
        };

        match self.company_repository.find_by_name(company).await? {
            Some(company) => Ok(company.find_type(&most_popular).cloned()),
            None => {
                self.log_company_not_found(company);
                Ok(None)
            }
        }
    }

    /// 指定されたクライアントの予約総数を取得（予約なしは0）
    pub async fn get_number_of_reservations_by(
        &self,
        client: &str,
    ) -> Result<u64, ApplicationError> {
        Ok(self.reservation_repository.count_by_client(client).await?)
    }

    /// 指定された会社・車種の予約総数を取得（予約なしは0）
    pub async fn get_number_of_reservations_for_car_type(
        &self,
        company: &str,
        car_type: &str,
    ) -> Result<u64, ApplicationError> {
        Ok(self
            .reservation_repository
            .count_for_car_type(company, car_type)
            .await?)
    }

    /// 指定された会社・車両の予約総数を取得（予約なしは0）
    pub async fn get_number_of_reservations_for_car(
        &self,
        company: &str,
        car_id: u32,
    ) -> Result<u64, ApplicationError> {
        Ok(self
            .reservation_repository
            .count_for_car(company, car_id)
            .await?)
    }

    fn log_company_not_found(&self, company: &str) {
        let mut context = HashMap::new();
        context.insert("company".to_string(), company.to_string());
        self.logger.warn(
            "manager",
            "レンタカー会社が見つかりません",
            Some(context),
        );
    }
}
