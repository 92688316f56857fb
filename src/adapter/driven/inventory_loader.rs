use crate::domain::model::{Car, CarType};
use std::path::Path;

/// データファイルから読み込まれた会社データ
#[derive(Debug, Clone)]
pub struct CompanyData {
    pub name: String,
    pub regions: Vec<String>,
    pub cars: Vec<Car>,
}

/// インベントリ読み込みエラー
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error reading data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed data file (line {line}): {message}")]
    Malformed { line: usize, message: String },
}

/// 会社データファイルの内容を解析する
/// 書式（1社につき1ファイル、行指向）:
/// - `#` で始まる行: コメント、読み飛ばす
/// - `-` で始まる行: `-会社名,地域1:地域2:...`
/// - その他の行: `車種名,定員,トランク容量,料金,喫煙可否,台数`
///   台数分の車両を作成し、車両IDは1回の読み込み内で0から連番
pub fn parse_company_data(input: &str) -> Result<CompanyData, LoadError> {
    let mut name: Option<String> = None;
    let mut regions: Vec<String> = Vec::new();
    let mut cars: Vec<Car> = Vec::new();
    let mut next_uid: u32 = 0;

    for (index, raw_line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(company_line) = line.strip_prefix('-') {
            let mut fields = company_line.split(',');
            let company_name = fields.next().filter(|s| !s.is_empty()).ok_or_else(|| {
                LoadError::Malformed {
                    line: line_no,
                    message: "会社名がありません".to_string(),
                }
            })?;
            let region_field = fields.next().ok_or_else(|| LoadError::Malformed {
                line: line_no,
                message: "地域リストがありません".to_string(),
            })?;

            name = Some(company_name.to_string());
            regions = region_field.split(':').map(str::to_string).collect();
            continue;
        }

        // 車種行: 名前, 定員, トランク容量, 1日あたり料金, 喫煙可否, 台数
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 6 {
            return Err(LoadError::Malformed {
                line: line_no,
                message: format!("車種行は6フィールド必要です（{}個）", fields.len()),
            });
        }

        let car_type = CarType::new(
            fields[0].to_string(),
            parse_field(fields[1], line_no, "定員")?,
            parse_field(fields[2], line_no, "トランク容量")?,
            parse_field(fields[3], line_no, "料金")?,
            parse_field(fields[4], line_no, "喫煙可否")?,
        );

        let count: u32 = parse_field(fields[5], line_no, "台数")?;
        for _ in 0..count {
            cars.push(Car::new(next_uid, car_type.clone()));
            next_uid += 1;
        }
    }

    let name = name.ok_or_else(|| LoadError::Malformed {
        line: 0,
        message: "会社行（-会社名,地域...）がありません".to_string(),
    })?;

    Ok(CompanyData {
        name,
        regions,
        cars,
    })
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    line: usize,
    field: &str,
) -> Result<T, LoadError> {
    value.parse().map_err(|_| LoadError::Malformed {
        line,
        message: format!("{}を解析できません: {}", field, value),
    })
}

/// 会社データファイルを読み込んで解析する
pub async fn load_company_data_file(path: &Path) -> Result<CompanyData, LoadError> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_company_data(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_company_line_and_type_line() {
        let data = parse_company_data(
            "-Hertz,Brussels:Antwerp\neconomy,4,200,35.0,true,3\n",
        )
        .unwrap();

        assert_eq!(data.name, "Hertz");
        assert_eq!(data.regions, vec!["Brussels", "Antwerp"]);
        assert_eq!(data.cars.len(), 3);
        // 車両IDは0から連番
        let ids: Vec<u32> = data.cars.iter().map(Car::id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(data.cars.iter().all(|c| c.car_type().name() == "economy"));
        assert!(data.cars[0].car_type().smoking_allowed());
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let data = parse_company_data(
            "# comment\n\n-Dockx,Leuven\n# another comment\neconomy,4,110,32.0,false,1\n",
        )
        .unwrap();
        assert_eq!(data.name, "Dockx");
        assert_eq!(data.cars.len(), 1);
    }

    #[test]
    fn test_ids_continue_across_type_lines() {
        let data = parse_company_data(
            "-Hertz,Brussels\neconomy,4,120,35.0,false,2\npremium,5,600,120.0,true,2\n",
        )
        .unwrap();
        let ids: Vec<u32> = data.cars.iter().map(Car::id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(data.cars[2].car_type().name(), "premium");
    }

    #[test]
    fn test_parse_without_company_line_fails() {
        let result = parse_company_data("economy,4,120,35.0,false,2\n");
        assert!(matches!(result, Err(LoadError::Malformed { .. })));
    }

    #[test]
    fn test_parse_wrong_field_count_fails() {
        let result = parse_company_data("-Hertz,Brussels\neconomy,4,120,35.0\n");
        assert!(matches!(result, Err(LoadError::Malformed { line: 2, .. })));
    }

    #[test]
    fn test_parse_bad_number_fails() {
        let result = parse_company_data("-Hertz,Brussels\neconomy,four,120,35.0,false,2\n");
        assert!(matches!(result, Err(LoadError::Malformed { line: 2, .. })));
    }
}
