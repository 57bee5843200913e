use model::core::value::Value;

use super::{MemoryExecutor, paged_model, users};
use crate::{
    config::{JoinTableConfig, SearchDefaults},
    error::SearchError,
    option::{CountOption, SearchOption},
    table::JoinTableModel,
};

fn id_of(row: &model::records::row::Row) -> i64 {
    match row.get_value("id") {
        Value::Int(id) => id,
        other => panic!("unexpected id {other:?}"),
    }
}

#[tokio::test]
async fn test_for_each_walks_every_page() {
    let executor = MemoryExecutor::with_rows(users(25));
    let model = paged_model(executor.clone(), 10);

    let mut seen = Vec::new();
    model
        .for_each(&SearchOption::new(), |row, index| seen.push((index, id_of(&row))))
        .await
        .unwrap();

    assert_eq!(seen.len(), 25);
    assert!(seen.iter().all(|&(index, id)| id == index as i64 + 1));
    assert_eq!(
        executor.statements(),
        vec![
            "SELECT `user`.* FROM `user` LIMIT 10",
            "SELECT `user`.* FROM `user` LIMIT 10 OFFSET 10",
            "SELECT `user`.* FROM `user` LIMIT 10 OFFSET 20",
        ]
    );
}

#[tokio::test]
async fn test_for_each_without_limit_reads_past_default_limit() {
    let executor = MemoryExecutor::with_rows(users(1500));
    let model = paged_model(executor.clone(), 1000);

    let mut visited = 0;
    model
        .for_each(&SearchOption::new(), |_, index| {
            assert_eq!(index, visited);
            visited += 1;
        })
        .await
        .unwrap();

    assert_eq!(visited, 1500);
    assert_eq!(
        executor.statements(),
        vec![
            "SELECT `user`.* FROM `user` LIMIT 1000",
            "SELECT `user`.* FROM `user` LIMIT 1000 OFFSET 1000",
        ]
    );
}

#[tokio::test]
async fn test_map_with_zero_limit_is_unbounded() {
    let model = paged_model(MemoryExecutor::with_rows(users(2500)), 1000);

    let ids = model
        .map(&SearchOption::new().limit(0), |row, _| id_of(&row))
        .await
        .unwrap();
    assert_eq!(ids.len(), 2500);
    assert_eq!(ids.last(), Some(&2500));
}

#[tokio::test]
async fn test_for_each_clamps_last_page_to_limit() {
    let executor = MemoryExecutor::with_rows(users(100));
    let model = paged_model(executor.clone(), 10);

    let option = SearchOption::new().offset(5).limit(15);
    let mut seen = Vec::new();
    model
        .for_each(&option, |row, index| seen.push((index, id_of(&row))))
        .await
        .unwrap();

    assert_eq!(seen.first(), Some(&(0, 6)));
    assert_eq!(seen.last(), Some(&(14, 20)));
    assert_eq!(
        executor.statements(),
        vec![
            "SELECT `user`.* FROM `user` LIMIT 10 OFFSET 5",
            "SELECT `user`.* FROM `user` LIMIT 5 OFFSET 15",
        ]
    );
}

#[tokio::test]
async fn test_for_each_limit_smaller_than_page() {
    let executor = MemoryExecutor::with_rows(users(100));
    let model = paged_model(executor.clone(), 10);

    let mut count = 0;
    model
        .for_each(&SearchOption::new().limit(3), |_, _| count += 1)
        .await
        .unwrap();

    assert_eq!(count, 3);
    assert_eq!(
        executor.statements(),
        vec!["SELECT `user`.* FROM `user` LIMIT 3"]
    );
}

#[tokio::test]
async fn test_map_collects_in_order() {
    let model = paged_model(MemoryExecutor::with_rows(users(7)), 3);

    let ids = model
        .map(&SearchOption::new(), |row, _| id_of(&row))
        .await
        .unwrap();
    assert_eq!(ids, (1..=7).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_for_each_stops_on_error() {
    let model = paged_model(MemoryExecutor::failing("timeout"), 10);

    let mut called = false;
    let result = model
        .for_each(&SearchOption::new(), |_, _| called = true)
        .await;
    assert!(matches!(result, Err(SearchError::Execute(_))));
    assert!(!called);
}

#[tokio::test]
async fn test_find_doubles_page_size_from_start() {
    let executor = MemoryExecutor::with_rows(users(100));
    let model = paged_model(executor.clone(), 10);

    let found = model
        .find(&SearchOption::new().offset(50), |row| id_of(row) == 5)
        .await
        .unwrap();

    assert_eq!(found.as_ref().map(id_of), Some(5));
    assert_eq!(
        executor.statements(),
        vec![
            "SELECT `user`.* FROM `user` LIMIT 1",
            "SELECT `user`.* FROM `user` LIMIT 2",
            "SELECT `user`.* FROM `user` LIMIT 4",
            "SELECT `user`.* FROM `user` LIMIT 8",
        ]
    );
}

#[tokio::test]
async fn test_find_stops_when_data_runs_out() {
    let executor = MemoryExecutor::with_rows(users(3));
    let model = paged_model(executor.clone(), 10);

    let found = model
        .find(&SearchOption::new(), |row| id_of(row) == 42)
        .await
        .unwrap();

    assert!(found.is_none());
    assert_eq!(executor.statements().len(), 3);
}

#[tokio::test]
async fn test_find_doubles_up_to_ceiling() {
    let executor = MemoryExecutor::with_rows(users(2000));
    let model = paged_model(executor.clone(), 10);

    let found = model
        .find(&SearchOption::new(), |_| false)
        .await
        .unwrap();

    assert!(found.is_none());
    let statements = executor.statements();
    // 1, 2, 4, ..., 1024
    assert_eq!(statements.len(), 11);
    assert_eq!(
        statements.last().unwrap(),
        "SELECT `user`.* FROM `user` LIMIT 1024"
    );
}

#[tokio::test]
async fn test_find_ceiling_is_configurable() {
    let executor = MemoryExecutor::with_rows(users(2000));
    let defaults = SearchDefaults {
        find_limit_max: 6,
        ..Default::default()
    };
    let config = JoinTableConfig::new("user").defaults(defaults);
    let model = JoinTableModel::new(config, executor.clone()).unwrap();

    let found = model.find(&SearchOption::new(), |_| false).await.unwrap();
    assert!(found.is_none());
    assert_eq!(
        executor.statements(),
        vec![
            "SELECT `user`.* FROM `user` LIMIT 1",
            "SELECT `user`.* FROM `user` LIMIT 2",
            "SELECT `user`.* FROM `user` LIMIT 4",
            "SELECT `user`.* FROM `user` LIMIT 6",
        ]
    );
}

#[tokio::test]
async fn test_count_helper() {
    let executor = MemoryExecutor::with_rows(users(9));
    let model = paged_model(executor.clone(), 10);

    let count = model.count(&CountOption::default()).await.unwrap();
    assert_eq!(count, 9);
    assert_eq!(
        executor.statements(),
        vec!["SELECT COUNT(`user`.`id`) AS `count` FROM `user`"]
    );
}
