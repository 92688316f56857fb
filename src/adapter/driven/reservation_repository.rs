use crate::adapter::database_error::DatabaseError;
use crate::domain::model::{RentalPeriod, Reservation};
use crate::domain::port::{RepositoryError, ReservationRepository};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

// MySQL関連のインポート
use sqlx::{MySql, Pool, Row};

/// MySQL予約リポジトリ
/// MySQLデータベースを使用して予約を永続化し、集計クエリに応答する
#[derive(Clone)]
pub struct MySqlReservationRepository {
    pool: Pool<MySql>,
}

impl MySqlReservationRepository {
    /// 新しいMySQL予約リポジトリを作成
    ///
    /// # Arguments
    /// * `pool` - MySQLコネクションプール
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for MySqlReservationRepository {
    async fn save_all(&self, reservations: &[Reservation]) -> Result<(), RepositoryError> {
        // バッチ全体を1つのトランザクションで書き込む。
        // 途中で失敗した場合はロールバックされ、1件も保存されない
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| {
                DatabaseError::ConnectionError(format!(
                    "トランザクション開始に失敗しました: {}",
                    e
                ))
            })
            .map_err(RepositoryError::from)?;

        for reservation in reservations {
            sqlx::query(
                r#"
                INSERT INTO reservations
                    (id, renter, start_date, end_date,
                     company_name, car_type_name, car_id, rental_price)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(reservation.id().to_string())
            .bind(reservation.renter())
            .bind(reservation.period().start())
            .bind(reservation.period().end())
            .bind(reservation.rental_company())
            .bind(reservation.car_type())
            .bind(reservation.car_id())
            .bind(reservation.rental_price())
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::QueryError(format!("予約の保存に失敗しました: {}", e)))
            .map_err(RepositoryError::from)?;
        }

        tx.commit()
            .await
            .map_err(|e| {
                DatabaseError::QueryError(format!(
                    "トランザクションのコミットに失敗しました: {}",
                    e
                ))
            })
            .map_err(RepositoryError::from)?;

        Ok(())
    }

    async fn unavailable_car_ids(
        &self,
        company: &str,
        period: &RentalPeriod,
    ) -> Result<HashSet<u32>, RepositoryError> {
        // 既存予約の期間（両端を含む）に対象期間の開始日または
        // 終了日が含まれる車両を利用不可とする
        let rows = sqlx::query(
            r#"
            SELECT car_id
            FROM reservations
            WHERE company_name = ?
              AND ((? BETWEEN start_date AND end_date)
                OR (? BETWEEN start_date AND end_date))
            "#,
        )
        .bind(company)
        .bind(period.start())
        .bind(period.end())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DatabaseError::QueryError(format!("利用不可車両の取得に失敗しました: {}", e))
        })
        .map_err(RepositoryError::from)?;

        Ok(rows
            .iter()
            .map(|row| row.get::<u32, _>("car_id"))
            .collect())
    }

    async fn counts_per_client(&self) -> Result<HashMap<String, u64>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT renter, COUNT(*) AS reservation_count
            FROM reservations
            GROUP BY renter
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DatabaseError::QueryError(format!("クライアント別集計に失敗しました: {}", e))
        })
        .map_err(RepositoryError::from)?;

        Ok(rows
            .iter()
            .map(|row| {
                (
                    row.get::<String, _>("renter"),
                    row.get::<i64, _>("reservation_count") as u64,
                )
            })
            .collect())
    }

    async fn count_by_client(&self, client: &str) -> Result<u64, RepositoryError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS reservation_count FROM reservations WHERE renter = ?",
        )
        .bind(client)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DatabaseError::QueryError(format!("クライアント別件数の取得に失敗しました: {}", e))
        })
        .map_err(RepositoryError::from)?;

        Ok(row.get::<i64, _>("reservation_count") as u64)
    }

    async fn count_for_car_type(
        &self,
        company: &str,
        car_type: &str,
    ) -> Result<u64, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS reservation_count
            FROM reservations
            WHERE company_name = ? AND car_type_name = ?
            "#,
        )
        .bind(company)
        .bind(car_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DatabaseError::QueryError(format!("車種別件数の取得に失敗しました: {}", e))
        })
        .map_err(RepositoryError::from)?;

        Ok(row.get::<i64, _>("reservation_count") as u64)
    }

    async fn counts_per_car_type_in_year(
        &self,
        company: &str,
        year: i32,
    ) -> Result<Vec<(String, u64)>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT car_type_name, COUNT(*) AS reservation_count
            FROM reservations
            WHERE company_name = ? AND YEAR(start_date) = ?
            GROUP BY car_type_name
            ORDER BY reservation_count DESC
            "#,
        )
        .bind(company)
        .bind(year)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DatabaseError::QueryError(format!("年別車種集計に失敗しました: {}", e))
        })
        .map_err(RepositoryError::from)?;

        Ok(rows
            .iter()
            .map(|row| {
                (
                    row.get::<String, _>("car_type_name"),
                    row.get::<i64, _>("reservation_count") as u64,
                )
            })
            .collect())
    }

    async fn count_for_car(&self, company: &str, car_id: u32) -> Result<u64, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS reservation_count
            FROM reservations
            WHERE company_name = ? AND car_id = ?
            "#,
        )
        .bind(company)
        .bind(car_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DatabaseError::QueryError(format!("車両別件数の取得に失敗しました: {}", e))
        })
        .map_err(RepositoryError::from)?;

        Ok(row.get::<i64, _>("reservation_count") as u64)
    }
}
