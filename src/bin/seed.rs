//! Seed script for development — writes a small sample dataset to the
//! configured `DATASET_PATH` so the server runs without the offline
//! CSV→JSON conversion pipeline.
//!
//! Usage: `cargo run --bin seed`

use chrono::Utc;
use threatdash::models::measure::ProtectionMeasure;
use threatdash::models::store::{DataStore, DatasetMetadata};
use threatdash::models::task::TacticalTask;
use threatdash::models::threat::Threat;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let path = std::env::var("DATASET_PATH").unwrap_or_else(|_| "data/dataset.json".to_string());

    println!("=== Threatdash Seed Script ===");

    let store = sample_store();
    if let Some(parent) = std::path::Path::new(&path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, serde_json::to_string_pretty(&store)?)?;

    println!(
        "[done] Wrote {} threats, {} measures, {} tasks to {path}",
        store.threats.len(),
        store.protection_measures.len(),
        store.tactical_tasks.len(),
    );
    Ok(())
}

fn sample_store() -> DataStore {
    let threats = sample_threats();
    let protection_measures = sample_measures();
    let tactical_tasks = sample_tasks();
    let metadata = DatasetMetadata {
        generated_at: Utc::now(),
        threat_count: threats.len() as i64,
        measure_count: protection_measures.len() as i64,
        task_count: tactical_tasks.len() as i64,
    };
    DataStore {
        threats,
        protection_measures,
        tactical_tasks,
        metadata,
    }
}

fn sample_threats() -> Vec<Threat> {
    vec![
        threat(
            1,
            "Угроза перехвата сетевого трафика",
            "Перехват незашифрованного трафика между клиентом и сервером.",
            34,
            &["Сбор информации, Эксфильтрация"],
            &["Внешний нарушитель с низким потенциалом"],
            &["Сетевой трафик", "Каналы связи"],
            (true, false, false),
            &["ЗИС.3"],
        ),
        threat(
            2,
            "Угроза внедрения вредоносного кода",
            "Внедрение и исполнение вредоносного кода на узле информационной системы.",
            6,
            &["Закрепление", "Повышение привилегий"],
            &["Внешний нарушитель со средним потенциалом"],
            &["Рабочие станции", "Серверы"],
            (true, true, true),
            &["АВЗ.1, АВЗ.2"],
        ),
        threat(
            3,
            "Угроза несанкционированного доступа к базе данных",
            "Доступ к защищаемой информации в обход правил разграничения доступа.",
            0,
            &["Сбор информации"],
            &["Внутренний нарушитель"],
            &["База данных"],
            (true, true, false),
            &["УПД.2", "Б/Н"],
        ),
        threat(
            4,
            "Угроза отказа в обслуживании",
            "Исчерпание ресурсов системы потоком запросов.",
            140,
            &["Воздействие"],
            &["Внешний нарушитель с низким потенциалом"],
            &["Серверы", "Каналы связи"],
            (false, false, true),
            &["Б/Н"],
        ),
        threat(
            5,
            "Угроза утечки данных через съёмные носители",
            "Копирование защищаемой информации на неучтённые съёмные носители.",
            88,
            &["Эксфильтрация"],
            &["Внутренний нарушитель"],
            &["Рабочие станции"],
            (true, false, false),
            &["ЗНИ.1, ЗНИ.2"],
        ),
    ]
}

fn sample_measures() -> Vec<ProtectionMeasure> {
    [
        (1, "Идентификация и аутентификация пользователей", "ИАФ.1"),
        (2, "Управление доступом к объектам", "УПД.2"),
        (3, "Антивирусная защита", "АВЗ.1"),
        (4, "Обновление базы данных признаков вредоносных программ", "АВЗ.2"),
        (5, "Учёт съёмных машинных носителей", "ЗНИ.1"),
        (6, "Управление доступом к съёмным носителям", "ЗНИ.2"),
        (7, "Защита информации при её передаче по каналам связи", "ЗИС.3"),
    ]
    .into_iter()
    .map(|(id, name, identifier)| ProtectionMeasure {
        id,
        name: name.to_string(),
        identifier: identifier.to_string(),
        regulatory_document: "Приказ ФСТЭК России №17".to_string(),
    })
    .collect()
}

fn sample_tasks() -> Vec<TacticalTask> {
    [
        (1, "Сбор информации", "Получение сведений об атакуемой системе."),
        (2, "Закрепление", "Обеспечение постоянного присутствия в системе."),
        (3, "Повышение привилегий", "Получение прав более высокого уровня."),
        (4, "Эксфильтрация", "Вывод собранных данных за периметр."),
        (5, "Воздействие", "Нарушение доступности или целостности системы."),
    ]
    .into_iter()
    .map(|(id, name, description)| TacticalTask {
        id,
        name: name.to_string(),
        description: description.to_string(),
        related_threats: Vec::new(),
        threat_count: 0,
    })
    .collect()
}

#[allow(clippy::too_many_arguments)]
fn threat(
    id: i64,
    name: &str,
    description: &str,
    fstec_id: i64,
    tasks: &[&str],
    violators: &[&str],
    objects: &[&str],
    (confidentiality, integrity, availability): (bool, bool, bool),
    measures: &[&str],
) -> Threat {
    Threat {
        id,
        name: name.to_string(),
        description: description.to_string(),
        fstec_id,
        tactical_tasks: tasks.iter().map(|s| s.to_string()).collect(),
        violator: violators.iter().map(|s| s.to_string()).collect(),
        object: objects.iter().map(|s| s.to_string()).collect(),
        confidentiality,
        integrity,
        availability,
        protection_measures: measures.iter().map(|s| s.to_string()).collect(),
    }
}
