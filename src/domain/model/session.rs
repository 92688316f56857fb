use crate::domain::error::DomainError;
use crate::domain::model::Quote;

/// 予約セッション
/// クライアントごとの対話状態（借り手名と見積もりリスト）を保持する。
/// サービスはステートレスであり、このコンテキストを呼び出しごとに受け取る
#[derive(Debug, Clone, Default)]
pub struct RentalSession {
    renter: Option<String>,
    quotes: Vec<Quote>,
}

impl RentalSession {
    /// 新しいセッションを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 借り手名を設定
    /// セッションごとに1回のみ設定できる
    ///
    /// # Returns
    /// * `Ok(())` - 設定成功
    /// * `Err(DomainError::RenterAlreadySet)` - 既に設定済み
    pub fn set_renter_name(&mut self, name: String) -> Result<(), DomainError> {
        if self.renter.is_some() {
            return Err(DomainError::RenterAlreadySet);
        }
        self.renter = Some(name);
        Ok(())
    }

    /// 借り手名を取得
    pub fn renter(&self) -> Option<&str> {
        self.renter.as_deref()
    }

    /// 現在の見積もりリストを取得
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// 見積もりをリストへ追加
    pub fn add_quote(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    /// 見積もりリストをクリア（確定成功後）
    pub fn clear_quotes(&mut self) {
        self.quotes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RentalPeriod;
    use chrono::NaiveDate;

    #[test]
    fn test_set_renter_name_once() {
        let mut session = RentalSession::new();
        assert!(session.set_renter_name("Alice".to_string()).is_ok());
        assert_eq!(session.renter(), Some("Alice"));
    }

    #[test]
    fn test_set_renter_name_twice_fails() {
        let mut session = RentalSession::new();
        session.set_renter_name("Alice".to_string()).unwrap();
        let result = session.set_renter_name("Bob".to_string());
        assert_eq!(result, Err(DomainError::RenterAlreadySet));
        // 元の名前は保持される
        assert_eq!(session.renter(), Some("Alice"));
    }

    #[test]
    fn test_quote_list_grows_and_clears() {
        let mut session = RentalSession::new();
        let period = RentalPeriod::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
        .unwrap();
        session.add_quote(Quote::new(
            "Alice".to_string(),
            period,
            "Hertz".to_string(),
            "economy".to_string(),
            140.0,
        ));
        assert_eq!(session.quotes().len(), 1);

        session.clear_quotes();
        assert!(session.quotes().is_empty());
    }
}
