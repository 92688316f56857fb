use car_rental_reservation::adapter::driven::{
    ConsoleLogger, MySqlCompanyRepository, MySqlReservationRepository,
};
use car_rental_reservation::adapter::{DatabaseConfig, DatabaseMigration};
use car_rental_reservation::application::service::{ManagerService, ReservationSessionService};
use car_rental_reservation::domain::model::{RentalPeriod, RentalSession};

use chrono::NaiveDate;
use sqlx::mysql::MySqlPoolOptions;
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== レンタカー予約管理システム ===");
    println!();

    // .envファイルから環境変数を読み込む
    dotenvy::dotenv().ok();

    // データベース設定を読み込む
    let config = DatabaseConfig::from_env()?;
    println!(
        "データベース設定を読み込みました: {}:{}",
        config.host, config.port
    );

    // 接続プールを作成
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.connection_string())
        .await?;
    println!("データベース接続プールを作成しました");

    // マイグレーションを実行
    let migration = DatabaseMigration::new(pool.clone());
    migration.run().await?;
    println!("データベースマイグレーションを実行しました");

    // リポジトリとロガーを作成
    let company_repository = Arc::new(MySqlCompanyRepository::new(pool.clone()));
    let reservation_repository = Arc::new(MySqlReservationRepository::new(pool.clone()));
    let logger = Arc::new(ConsoleLogger::new());

    // アプリケーションサービスを作成
    let manager = ManagerService::new(
        company_repository.clone(),
        reservation_repository.clone(),
        logger.clone(),
    );
    let sessions = ReservationSessionService::new(
        company_repository,
        reservation_repository,
        logger,
    );

    // インベントリデータファイルを読み込む
    manager.load_rental_company(Path::new("data/hertz.csv")).await?;
    manager.load_rental_company(Path::new("data/dockx.csv")).await?;

    println!();
    println!("登録済みレンタカー会社:");
    for name in sessions.get_all_rental_companies().await? {
        println!("  - {}", name);
    }

    // デモシナリオ: 見積もり作成から一括確定まで
    let period = RentalPeriod::new(
        NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
        NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
    )?;

    println!();
    println!("対象期間 {} の利用可能な車種:", period);
    for car_type in sessions.get_available_car_types(period).await? {
        println!("  {}", car_type);
    }

    let cheapest = sessions
        .get_cheapest_car_type(period, Some("Leuven"))
        .await?;
    println!("Leuven地域で最も安い車種: {}", cheapest);

    let mut session = RentalSession::new();
    sessions.set_renter_name(&mut session, "Alice")?;

    sessions
        .create_quote(&mut session, "Alice", period, "economy", Some("Brussels"))
        .await?;
    sessions
        .create_quote(&mut session, "Alice", period, "premium", None)
        .await?;

    println!();
    println!("作成された見積もり:");
    for quote in sessions.current_quotes(&session) {
        println!("{}", quote);
        println!();
    }

    let reservations = sessions.confirm_quotes(&mut session).await?;
    println!("確定された予約:");
    for reservation in &reservations {
        println!("{}", reservation);
        println!();
    }

    // レポートクエリの実行例
    println!("レポート:");
    println!(
        "  Aliceの予約件数: {}",
        manager.get_number_of_reservations_by("Alice").await?
    );
    println!(
        "  Hertz economyの予約件数: {}",
        manager
            .get_number_of_reservations_for_car_type("Hertz", "economy")
            .await?
    );
    println!("  最優良クライアント: {:?}", manager.get_best_clients().await?);
    if let Some(car_type) = manager.get_most_popular_car_type_in("Hertz", 2026).await? {
        println!("  Hertzで2026年に最も人気の車種: {}", car_type.name());
    }

    Ok(())
}
