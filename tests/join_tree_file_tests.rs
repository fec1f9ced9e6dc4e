use std::fs;
use table2json::{Catalog, JoinKind, JoinTree, Table2JsonError, parse_create_table};
use tempfile::tempdir;

const PRODUCT: &str = "CREATE TABLE `product` (
  `id` int(11) NOT NULL AUTO_INCREMENT,
  `product_type_id` int(11) NOT NULL,
  `name` varchar(128) NOT NULL,
  `active` tinyint(1) NOT NULL DEFAULT '1',
  PRIMARY KEY (`id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8";

const PDATES: &str = "CREATE TABLE `pdates` (
  `product_id` int(11) NOT NULL,
  `kind` varchar(16) NOT NULL,
  `day` date NOT NULL,
  `position` int(11) NOT NULL DEFAULT '0',
  KEY `product_id` (`product_id`)
) ENGINE=InnoDB DEFAULT CHARSET=utf8";

const TASK: &str = r#"{
  "host": "localhost",
  "username": "reader",
  "root": "product",
  "alias": "p",
  "predicate": "p.product_type_id = 22",
  "exclude": ["product_type_id"],
  "order": ["position", "sequence"],
  "joins": [
    {"kind": "array", "key": "dates", "table": "pdates",
     "join_field": "product_id", "outer_key": "p.id"}
  ]
}"#;

#[test]
fn test_compile_task_file() {
    let dir = tempdir().unwrap();
    let task_path = dir.path().join("task.json");
    fs::write(&task_path, TASK).unwrap();

    let tree = JoinTree::from_path(&task_path).unwrap();
    assert_eq!(tree.root, "product");
    assert_eq!(tree.joins[0].kind, JoinKind::Array);

    let catalog = Catalog::new()
        .with_table(parse_create_table(PRODUCT).unwrap())
        .unwrap()
        .with_table(parse_create_table(PDATES).unwrap())
        .unwrap();
    let query = tree.compile(&catalog).unwrap();
    let text = query.to_string();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("SET group_concat_max_len = 65000;"));
    let statement = lines.next().unwrap();
    assert!(statement.ends_with("FROM `product` p WHERE p.product_type_id = 22;"));
    assert!(statement.contains("ORDER BY `position` SEPARATOR ','"));
    assert!(statement.contains("FROM `pdates` WHERE `product_id` = p.id"));
    assert!(!statement.contains("sequence"));
    assert!(!statement.contains("\"product_type_id\":"));
    assert!(statement.contains("IF(`active`=0,'false','true')"));
}

#[test]
fn test_missing_task_file() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        JoinTree::from_path(dir.path().join("absent.json")),
        Err(Table2JsonError::Io(_))
    ));
}

#[test]
fn test_unknown_join_kind() {
    let dir = tempdir().unwrap();
    let task_path = dir.path().join("task.json");
    fs::write(
        &task_path,
        r#"{"root": "product", "joins": [
            {"kind": "tree", "table": "pdates", "join_field": "product_id", "outer_key": "p.id"}
        ]}"#,
    )
    .unwrap();
    assert!(matches!(
        JoinTree::from_path(&task_path),
        Err(Table2JsonError::ConfigFormat(_))
    ));
}
