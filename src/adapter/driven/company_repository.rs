use crate::adapter::database_error::DatabaseError;
use crate::domain::model::{Car, CarRentalCompany, CarType};
use crate::domain::port::{CompanyRepository, RepositoryError};
use async_trait::async_trait;

// MySQL関連のインポート
use sqlx::{MySql, Pool, Row};

/// MySQLレンタカー会社リポジトリ
/// MySQLデータベースを使用して会社集約（地域・車種・車両）を永続化する
#[derive(Clone)]
pub struct MySqlCompanyRepository {
    pool: Pool<MySql>,
}

impl MySqlCompanyRepository {
    /// 新しいMySQL会社リポジトリを作成
    ///
    /// # Arguments
    /// * `pool` - MySQLコネクションプール
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    /// 会社名から会社集約を再構築する
    /// 地域と車両（車種をJOIN）を別々に取得して組み立てる
    async fn build_company(&self, name: &str) -> Result<CarRentalCompany, RepositoryError> {
        let region_rows = sqlx::query(
            r#"
            SELECT region
            FROM company_regions
            WHERE company_name = ?
            ORDER BY region
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::QueryError(format!("地域の取得に失敗しました: {}", e)))
        .map_err(RepositoryError::from)?;

        let regions: Vec<String> = region_rows
            .iter()
            .map(|row| row.get::<String, _>("region"))
            .collect();

        let car_rows = sqlx::query(
            r#"
            SELECT
                c.id,
                ct.name, ct.nb_of_seats, ct.trunk_space,
                ct.rental_price_per_day, ct.smoking_allowed
            FROM cars c
            JOIN car_types ct
                ON c.company_name = ct.company_name AND c.car_type_name = ct.name
            WHERE c.company_name = ?
            ORDER BY c.id
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::QueryError(format!("車両の取得に失敗しました: {}", e)))
        .map_err(RepositoryError::from)?;

        let mut cars = Vec::with_capacity(car_rows.len());
        for row in &car_rows {
            let car_type = CarType::new(
                row.get::<String, _>("name"),
                row.get::<u32, _>("nb_of_seats"),
                row.get::<f32, _>("trunk_space"),
                row.get::<f64, _>("rental_price_per_day"),
                row.get::<bool, _>("smoking_allowed"),
            );
            cars.push(Car::new(row.get::<u32, _>("id"), car_type));
        }

        Ok(CarRentalCompany::new(name.to_string(), regions, cars))
    }
}

#[async_trait]
impl CompanyRepository for MySqlCompanyRepository {
    async fn save(&self, company: &CarRentalCompany) -> Result<(), RepositoryError> {
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

        // 会社データをcompaniesテーブルにUPSERT
        sqlx::query(
            r#"
            INSERT INTO companies (name)
            VALUES (?)
            ON DUPLICATE KEY UPDATE name = VALUES(name)
            "#,
        )
        .bind(company.name())
        .execute(&mut *tx)
        .await
        .map_err(|e| DatabaseError::QueryError(format!("会社の保存に失敗しました: {}", e)))
        .map_err(RepositoryError::from)?;

        // 既存の子レコードを削除してから入れ直す
        for delete_sql in [
            "DELETE FROM company_regions WHERE company_name = ?",
            "DELETE FROM cars WHERE company_name = ?",
            "DELETE FROM car_types WHERE company_name = ?",
        ] {
            sqlx::query(delete_sql)
                .bind(company.name())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    DatabaseError::QueryError(format!("既存データの削除に失敗しました: {}", e))
                })
                .map_err(RepositoryError::from)?;
        }

        for region in company.regions() {
            sqlx::query(
                r#"
                INSERT INTO company_regions (company_name, region)
                VALUES (?, ?)
                "#,
            )
            .bind(company.name())
            .bind(region)
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::QueryError(format!("地域の保存に失敗しました: {}", e)))
            .map_err(RepositoryError::from)?;
        }

        for car_type in company.all_types() {
            sqlx::query(
                r#"
                INSERT INTO car_types
                    (company_name, name, nb_of_seats, trunk_space,
                     rental_price_per_day, smoking_allowed)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(company.name())
            .bind(car_type.name())
            .bind(car_type.nb_of_seats())
            .bind(car_type.trunk_space())
            .bind(car_type.rental_price_per_day())
            .bind(car_type.smoking_allowed())
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::QueryError(format!("車種の保存に失敗しました: {}", e)))
            .map_err(RepositoryError::from)?;
        }

        for car in company.cars() {
            sqlx::query(
                r#"
                INSERT INTO cars (company_name, id, car_type_name)
                VALUES (?, ?, ?)
                "#,
            )
            .bind(company.name())
            .bind(car.id())
            .bind(car.car_type().name())
            .execute(&mut *tx)
            .await
            .map_err(|e| DatabaseError::QueryError(format!("車両の保存に失敗しました: {}", e)))
            .map_err(RepositoryError::from)?;
        }

        // トランザクションをコミット
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

    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<CarRentalCompany>, RepositoryError> {
        let row = sqlx::query("SELECT name FROM companies WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::QueryError(format!("会社の取得に失敗しました: {}", e)))
            .map_err(RepositoryError::from)?;

        match row {
            Some(_) => Ok(Some(self.build_company(name).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<CarRentalCompany>, RepositoryError> {
        let names = self.find_all_names().await?;

        let mut companies = Vec::with_capacity(names.len());
        for name in &names {
            companies.push(self.build_company(name).await?);
        }
        Ok(companies)
    }

    async fn find_all_names(&self) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query("SELECT name FROM companies ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DatabaseError::QueryError(format!("会社名一覧の取得に失敗しました: {}", e))
            })
            .map_err(RepositoryError::from)?;

        Ok(rows
            .iter()
            .map(|row| row.get::<String, _>("name"))
            .collect())
    }

    async fn find_by_region(
        &self,
        region: &str,
    ) -> Result<Vec<CarRentalCompany>, RepositoryError> {
        // 地域はバインドパラメータで渡す（クエリ文字列の組み立てはしない）
        let rows = sqlx::query(
            r#"
            SELECT c.name
            FROM companies c
            JOIN company_regions r ON c.name = r.company_name
            WHERE r.region = ?
            ORDER BY c.name
            "#,
        )
        .bind(region)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DatabaseError::QueryError(format!("地域別会社一覧の取得に失敗しました: {}", e))
        })
        .map_err(RepositoryError::from)?;

        let mut companies = Vec::with_capacity(rows.len());
        for row in &rows {
            let name: String = row.get("name");
            companies.push(self.build_company(&name).await?);
        }
        Ok(companies)
    }
}
