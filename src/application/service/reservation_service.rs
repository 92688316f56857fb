use crate::application::ApplicationError;
use crate::domain::model::{
    CarRentalCompany, CarType, Quote, RentalPeriod, RentalSession, Reservation,
    ReservationConstraints,
};
use crate::domain::port::{CompanyRepository, Logger, ReservationRepository};
use std::collections::BTreeSet;
use std::sync::Arc;

/// 予約セッションサービス
/// 見積もり作成（Quote Engine）と一括確定（Confirmation Engine）を担う。
/// サービス自体はステートレスで、セッション状態は呼び出しごとに受け取る
pub struct ReservationSessionService {
    company_repository: Arc<dyn CompanyRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    logger: Arc<dyn Logger>,
}

impl ReservationSessionService {
    /// 新しい予約セッションサービスを作成
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

    /// セッションに借り手名を設定
    /// セッションごとに1回のみ設定できる
    pub fn set_renter_name(
        &self,
        session: &mut RentalSession,
        name: &str,
    ) -> Result<(), ApplicationError> {
        session.set_renter_name(name.to_string())?;
        Ok(())
    }

    /// セッション内の現在の見積もりリストを取得
    pub fn current_quotes(&self, session: &RentalSession) -> Vec<Quote> {
        session.quotes().to_vec()
    }

    /// すべてのレンタカー会社名を取得
    pub async fn get_all_rental_companies(&self) -> Result<BTreeSet<String>, ApplicationError> {
        let names = self.company_repository.find_all_names().await?;
        Ok(names.into_iter().collect())
    }

    /// 候補会社を列挙順で取得
    /// 地域が指定された場合はその地域でサービスを提供する会社に限定する
    async fn candidate_companies(
        &self,
        region: Option<&str>,
    ) -> Result<Vec<CarRentalCompany>, ApplicationError> {
        let companies = match region {
            Some(region) => self.company_repository.find_by_region(region).await?,
            None => self.company_repository.find_all().await?,
        };
        Ok(companies)
    }

    /// 見積もりを作成
    /// 候補会社を列挙順に調べ、対象期間に希望車種の空き車両を持つ
    /// 最初の会社を選ぶ（first-fit。会社間の価格比較は行わない）。
    /// 料金計算と車種割り当ては選ばれた会社に委譲し、
    /// 作成された見積もりをセッションのリストへ追加する
    ///
    /// # Arguments
    /// * `session` - 予約セッション
    /// * `renter` - 借り手名
    /// * `period` - 貸出期間
    /// * `car_type` - 希望車種名
    /// * `region` - 地域（任意）
    ///
    /// # Returns
    /// * `Ok(Quote)` - 作成された見積もり
    /// * `Err(ApplicationError)` - 空き車両なし、未知の車種、またはストア障害
    pub async fn create_quote(
        &self,
        session: &mut RentalSession,
        renter: &str,
        period: RentalPeriod,
        car_type: &str,
        region: Option<&str>,
    ) -> Result<Quote, ApplicationError> {
        let constraints = ReservationConstraints::new(
            period,
            car_type.to_string(),
            region.map(str::to_string),
        );

        let companies = self.candidate_companies(region).await?;

        let mut type_known = false;
        for company in &companies {
            if company.find_type(car_type).is_none() {
                continue;
            }
            type_known = true;

            let unavailable = self
                .reservation_repository
                .unavailable_car_ids(company.name(), &period)
                .await?;

            if company.has_available_car(car_type, &unavailable) {
                let quote = company.create_quote(&constraints, renter, &unavailable)?;
                session.add_quote(quote.clone());
                return Ok(quote);
            }
        }

        if !type_known {
            return Err(ApplicationError::DomainError(
                crate::domain::error::DomainError::UnknownCarType(car_type.to_string()),
            ));
        }

        Err(ApplicationError::NoCarsAvailable(
            "与えられた条件で利用可能な車両が見つかりません".to_string(),
        ))
    }

    /// 対象期間で利用可能な最も安い車種の名前を取得
    /// 候補会社（地域指定時はその地域の会社）の全車種のうち、
    /// 期間内に1台以上の空き車両がある車種を1日あたり料金の昇順で
    /// 評価し、最安のものを返す。同額の場合は列挙順で先の車種が勝つ
    ///
    /// # Returns
    /// * `Ok(String)` - 最安の車種名
    /// * `Err(ApplicationError::NoCarsAvailable)` - 利用可能な車種がない
    pub async fn get_cheapest_car_type(
        &self,
        period: RentalPeriod,
        region: Option<&str>,
    ) -> Result<String, ApplicationError> {
        let companies = self.candidate_companies(region).await?;

        let mut cheapest: Option<(String, f64)> = None;
        for company in &companies {
            let unavailable = self
                .reservation_repository
                .unavailable_car_ids(company.name(), &period)
                .await?;

            for car_type in company.all_types() {
                if !company.has_available_car(car_type.name(), &unavailable) {
                    continue;
                }
                let is_cheaper = match &cheapest {
                    Some((_, price)) => car_type.rental_price_per_day() < *price,
                    None => true,
                };
                if is_cheaper {
                    cheapest = Some((
                        car_type.name().to_string(),
                        car_type.rental_price_per_day(),
                    ));
                }
            }
        }

        cheapest.map(|(name, _)| name).ok_or_else(|| {
            ApplicationError::NoCarsAvailable(
                "対象期間に利用可能な車種がありません".to_string(),
            )
        })
    }

    /// 対象期間で利用可能な車種の一覧を取得
    /// 全会社を対象とし（地域フィルタなし）、期間内に1台以上の
    /// 空き車両がある車種のみを返す。重複は除かれる
    pub async fn get_available_car_types(
        &self,
        period: RentalPeriod,
    ) -> Result<Vec<CarType>, ApplicationError> {
        let companies = self.company_repository.find_all().await?;

        let mut available: Vec<CarType> = Vec::new();
        for company in &companies {
            let unavailable = self
                .reservation_repository
                .unavailable_car_ids(company.name(), &period)
                .await?;

            for car_type in company.all_types() {
                if company.has_available_car(car_type.name(), &unavailable)
                    && !available.contains(&car_type)
                {
                    available.push(car_type);
                }
            }
        }

        Ok(available)
    }

    /// セッション内の見積もりをリスト順に一括確定
    /// 各見積もりについて所有会社が空き状況を再検証して車両を割り当てる。
    /// 同一バッチ内で先に割り当てた車両も利用不可として扱う。
    /// 全件の割り当てに成功した場合のみ、バッチ全体を単一のストア
    /// トランザクションで永続化する。割り当てまたは永続化が失敗した
    /// 場合は1件も保存されず、原因をラップした単一のエラーを返す
    /// （呼び出し側から見て全か無か。部分的な予約が外部から見える
    /// ことはない）。
    /// 全件成功時はセッションの見積もりリストをクリアし、
    /// 入力順の予約リストを返す
    ///
    /// # Arguments
    /// * `session` - 予約セッション
    ///
    /// # Returns
    /// * `Ok(Vec<Reservation>)` - 確定された予約（入力順）
    /// * `Err(ApplicationError::ConfirmationFailed)` - 確定失敗（1件も保存されない）
    pub async fn confirm_quotes(
        &self,
        session: &mut RentalSession,
    ) -> Result<Vec<Reservation>, ApplicationError> {
        let quotes = session.quotes().to_vec();

        let mut confirmed: Vec<Reservation> = Vec::new();
        for quote in &quotes {
            match self.confirm_single_quote(quote, &confirmed).await {
                Ok(reservation) => confirmed.push(reservation),
                Err(cause) => {
                    self.log_confirmation_failure(&cause);
                    return Err(ApplicationError::ConfirmationFailed(cause.to_string()));
                }
            }
        }

        if let Err(err) = self.reservation_repository.save_all(&confirmed).await {
            let cause = ApplicationError::from(err);
            self.log_confirmation_failure(&cause);
            return Err(ApplicationError::ConfirmationFailed(cause.to_string()));
        }

        session.clear_quotes();
        Ok(confirmed)
    }

    /// 1件の見積もりに車両を割り当てる（永続化はしない）
    /// 永続化済みの予約に加え、同一バッチで既に割り当てた車両も
    /// 利用不可として扱う
    async fn confirm_single_quote(
        &self,
        quote: &Quote,
        confirmed: &[Reservation],
    ) -> Result<Reservation, ApplicationError> {
        let company = self
            .company_repository
            .find_by_name(quote.rental_company())
            .await?
            .ok_or_else(|| {
                ApplicationError::NotFound(format!(
                    "レンタカー会社が見つかりません: {}",
                    quote.rental_company()
                ))
            })?;

        let mut unavailable = self
            .reservation_repository
            .unavailable_car_ids(company.name(), quote.period())
            .await?;
        for reservation in confirmed {
            if reservation.rental_company() == company.name()
                && reservation.period().blocks(quote.period())
            {
                unavailable.insert(reservation.car_id());
            }
        }

        let reservation = company.confirm_quote(quote, &unavailable)?;
        Ok(reservation)
    }

    fn log_confirmation_failure(&self, cause: &ApplicationError) {
        self.logger.error(
            "reservation_session",
            &format!("見積もりの一括確定に失敗しました: {}", cause),
            None,
        );
    }
}
