// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! The seven end-to-end scenarios of spec.md §8, run against an
//! all-in-process cluster.

use integration_tests::{build_table, new_cluster, sorted_rows, sorted_values, write_rows};
use value::{ColumnSchema, DataType, Row, Schema, Value};

fn student_schema() -> Schema {
    Schema::new(
        "student",
        vec![
            ColumnSchema::new("sid", DataType::Int32),
            ColumnSchema::new("name", DataType::String),
            ColumnSchema::new("age", DataType::Int32),
            ColumnSchema::new("grade", DataType::Float64),
        ],
    )
    .unwrap()
}

fn course_registration_schema() -> Schema {
    Schema::new(
        "courseRegistration",
        vec![
            ColumnSchema::new("sid", DataType::Int32),
            ColumnSchema::new("courseId", DataType::Int32),
        ],
    )
    .unwrap()
}

fn student_rows() -> Vec<Row> {
    vec![
        Row::new(vec![
            Value::Int32(0),
            Value::String("John".into()),
            Value::Int32(22),
            Value::Float64(4.0),
        ]),
        Row::new(vec![
            Value::Int32(1),
            Value::String("Smith".into()),
            Value::Int32(23),
            Value::Float64(3.6),
        ]),
        Row::new(vec![
            Value::Int32(2),
            Value::String("Hana".into()),
            Value::Int32(21),
            Value::Float64(4.0),
        ]),
    ]
}

fn course_registration_rows() -> Vec<Row> {
    vec![
        Row::new(vec![Value::Int32(0), Value::Int32(0)]),
        Row::new(vec![Value::Int32(0), Value::Int32(1)]),
        Row::new(vec![Value::Int32(1), Value::Int32(0)]),
        Row::new(vec![Value::Int32(2), Value::Int32(2)]),
    ]
}

/// Scenario 1: horizontal split of `student` on `grade`, full projection,
/// joined against `courseRegistration` on a third node.
#[tokio::test]
async fn horizontal_split_student_join_course_registration() {
    let coordinator = new_cluster(3);
    let spec = r#"{
        "0": { "predicate": { "grade": [ {"op": "<=", "val": 3.6} ] }, "column": ["sid","name","age","grade"] },
        "1": { "predicate": { "grade": [ {"op": ">", "val": 3.6} ] }, "column": ["sid","name","age","grade"] }
    }"#;
    build_table(&coordinator, "student", student_schema(), spec).await;
    write_rows(&coordinator, "student", student_rows()).await;

    let cr_spec = r#"{ "2": { "predicate": {}, "column": ["sid","courseId"] } }"#;
    build_table(
        &coordinator,
        "courseRegistration",
        course_registration_schema(),
        cr_spec,
    )
    .await;
    write_rows(
        &coordinator,
        "courseRegistration",
        course_registration_rows(),
    )
    .await;

    let joined = coordinator
        .join(&["student", "courseRegistration"])
        .await
        .unwrap();

    let expected = sorted_values(vec![
        vec![
            Value::Int32(0),
            Value::String("John".into()),
            Value::Int32(22),
            Value::Float64(4.0),
            Value::Int32(0),
        ],
        vec![
            Value::Int32(0),
            Value::String("John".into()),
            Value::Int32(22),
            Value::Float64(4.0),
            Value::Int32(1),
        ],
        vec![
            Value::Int32(1),
            Value::String("Smith".into()),
            Value::Int32(23),
            Value::Float64(3.6),
            Value::Int32(0),
        ],
        vec![
            Value::Int32(2),
            Value::String("Hana".into()),
            Value::Int32(21),
            Value::Float64(4.0),
            Value::Int32(2),
        ],
    ]);
    assert_eq!(sorted_rows(&joined), expected);
}

/// Scenario 2: the same logical data, vertically split on top of the
/// horizontal shard, with an overlapping replicated rule class. Set cover
/// must still pick the cheapest node per rule.
#[tokio::test]
async fn vertical_split_on_horizontal_shard() {
    let coordinator = new_cluster(3);
    let spec = r#"{
        "0|1": { "predicate": { "grade": [ {"op": "<=", "val": 3.6} ] }, "column": ["sid","name"] },
        "0|1|2": { "predicate": { "grade": [ {"op": "<=", "val": 3.6} ] }, "column": ["age","grade"] },
        "1|2": { "predicate": { "grade": [ {"op": ">", "val": 3.6} ] }, "column": ["sid","name","age","grade"] }
    }"#;
    build_table(&coordinator, "student", student_schema(), spec).await;
    write_rows(&coordinator, "student", student_rows()).await;

    let cr_spec = r#"{ "2": { "predicate": {}, "column": ["sid","courseId"] } }"#;
    build_table(
        &coordinator,
        "courseRegistration",
        course_registration_schema(),
        cr_spec,
    )
    .await;
    write_rows(
        &coordinator,
        "courseRegistration",
        course_registration_rows(),
    )
    .await;

    let joined = coordinator
        .join(&["student", "courseRegistration"])
        .await
        .unwrap();

    let expected = sorted_values(vec![
        vec![
            Value::Int32(0),
            Value::String("John".into()),
            Value::Int32(22),
            Value::Float64(4.0),
            Value::Int32(0),
        ],
        vec![
            Value::Int32(0),
            Value::String("John".into()),
            Value::Int32(22),
            Value::Float64(4.0),
            Value::Int32(1),
        ],
        vec![
            Value::Int32(1),
            Value::String("Smith".into()),
            Value::Int32(23),
            Value::Float64(3.6),
            Value::Int32(0),
        ],
        vec![
            Value::Int32(2),
            Value::String("Hana".into()),
            Value::Int32(21),
            Value::Float64(4.0),
            Value::Int32(2),
        ],
    ]);
    assert_eq!(sorted_rows(&joined), expected);
}

/// Scenario 3: semi-join against a superset of student rows, with some
/// rows of `courseRegistration` matching and some not.
#[tokio::test]
async fn semi_join_non_overlapping() {
    let coordinator = new_cluster(2);
    let spec = r#"{ "0": { "predicate": {}, "column": ["sid","name","age","grade"] } }"#;
    build_table(&coordinator, "student", student_schema(), spec).await;
    let mut rows = student_rows();
    rows.push(Row::new(vec![
        Value::Int32(3),
        Value::String("Eve".into()),
        Value::Int32(21),
        Value::Float64(3.2),
    ]));
    rows.push(Row::new(vec![
        Value::Int32(4),
        Value::String("Lewis".into()),
        Value::Int32(21),
        Value::Float64(3.0),
    ]));
    write_rows(&coordinator, "student", rows).await;

    let cr_spec = r#"{ "1": { "predicate": {}, "column": ["sid","courseId"] } }"#;
    build_table(
        &coordinator,
        "courseRegistration",
        course_registration_schema(),
        cr_spec,
    )
    .await;
    write_rows(
        &coordinator,
        "courseRegistration",
        vec![
            Row::new(vec![Value::Int32(0), Value::Int32(0)]),
            Row::new(vec![Value::Int32(2), Value::Int32(1)]),
            Row::new(vec![Value::Int32(1), Value::Int32(0)]),
            Row::new(vec![Value::Int32(4), Value::Int32(0)]),
        ],
    )
    .await;

    let result = coordinator
        .semi_join("sid", "student", "courseRegistration")
        .await
        .unwrap();

    let expected = sorted_values(vec![
        vec![
            Value::Int32(0),
            Value::String("John".into()),
            Value::Int32(22),
            Value::Float64(4.0),
        ],
        vec![
            Value::Int32(1),
            Value::String("Smith".into()),
            Value::Int32(23),
            Value::Float64(3.6),
        ],
        vec![
            Value::Int32(2),
            Value::String("Hana".into()),
            Value::Int32(21),
            Value::Float64(4.0),
        ],
        vec![
            Value::Int32(4),
            Value::String("Lewis".into()),
            Value::Int32(21),
            Value::Float64(3.0),
        ],
    ]);
    assert_eq!(sorted_rows(&result), expected);
}

/// Scenario 4: semi-join against an empty right table is the empty
/// multiset, under the left table's schema.
#[tokio::test]
async fn semi_join_empty_right_side() {
    let coordinator = new_cluster(2);
    let spec = r#"{ "0": { "predicate": {}, "column": ["sid","name","age","grade"] } }"#;
    build_table(&coordinator, "student", student_schema(), spec).await;
    write_rows(&coordinator, "student", student_rows()).await;

    let cr_spec = r#"{ "1": { "predicate": {}, "column": ["sid","courseId"] } }"#;
    build_table(
        &coordinator,
        "courseRegistration",
        course_registration_schema(),
        cr_spec,
    )
    .await;

    let result = coordinator
        .semi_join("sid", "student", "courseRegistration")
        .await
        .unwrap();
    assert!(result.rows.is_empty());
    assert_eq!(result.schema.names(), student_schema().names());
}

/// Scenario 5: semi-join where no right-side row's join value matches any
/// left-side row.
#[tokio::test]
async fn semi_join_no_matches() {
    let coordinator = new_cluster(2);
    let spec = r#"{ "0": { "predicate": {}, "column": ["sid","name","age","grade"] } }"#;
    build_table(&coordinator, "student", student_schema(), spec).await;
    write_rows(&coordinator, "student", student_rows()).await;

    let cr_spec = r#"{ "1": { "predicate": {}, "column": ["sid","courseId"] } }"#;
    build_table(
        &coordinator,
        "courseRegistration",
        course_registration_schema(),
        cr_spec,
    )
    .await;
    write_rows(
        &coordinator,
        "courseRegistration",
        vec![
            Row::new(vec![Value::Int32(10), Value::Int32(0)]),
            Row::new(vec![Value::Int32(10), Value::Int32(1)]),
            Row::new(vec![Value::Int32(11), Value::Int32(0)]),
            Row::new(vec![Value::Int32(12), Value::Int32(2)]),
        ],
    )
    .await;

    let result = coordinator
        .semi_join("sid", "student", "courseRegistration")
        .await
        .unwrap();
    assert!(result.rows.is_empty());
}

/// Scenario 6: a table with no primary-key-like column in its schema at
/// all (no rule, nor the schema itself, ever carries a `sid`), split into
/// three rules so no single one stores a full row. Reconstruction and
/// semi-join must still identify tuples purely by the coordinator-assigned
/// row-id. Exercised via the semi-join idempotence invariant of spec.md §8
/// (`SemiJoin(c, T, T) == GetFull(T)`), which forces both the direct branch
/// (rules carrying the join column) and the deferred, fetch-by-pk branch
/// (rules that don't) to cooperate on the same rows.
#[tokio::test]
async fn missing_primary_key_in_projections() {
    let coordinator = new_cluster(3);
    let schema = Schema::new(
        "student",
        vec![
            ColumnSchema::new("name", DataType::String),
            ColumnSchema::new("age", DataType::Int32),
            ColumnSchema::new("grade", DataType::Float64),
        ],
    )
    .unwrap();
    let spec = r#"{
        "0": { "predicate": { "grade": [ {"op": "<=", "val": 3.6} ] }, "column": ["name"] },
        "1": { "predicate": { "grade": [ {"op": "<=", "val": 3.6} ] }, "column": ["age","grade"] },
        "2": { "predicate": { "grade": [ {"op": ">", "val": 3.6} ] }, "column": ["name","age","grade"] }
    }"#;
    build_table(&coordinator, "student", schema, spec).await;
    write_rows(
        &coordinator,
        "student",
        vec![
            Row::new(vec![
                Value::String("John".into()),
                Value::Int32(22),
                Value::Float64(4.0),
            ]),
            Row::new(vec![
                Value::String("Smith".into()),
                Value::Int32(23),
                Value::Float64(3.6),
            ]),
            Row::new(vec![
                Value::String("Hana".into()),
                Value::Int32(21),
                Value::Float64(4.0),
            ]),
        ],
    )
    .await;

    let result = coordinator
        .semi_join("name", "student", "student")
        .await
        .unwrap();

    let expected = sorted_values(vec![
        vec![
            Value::String("John".into()),
            Value::Int32(22),
            Value::Float64(4.0),
        ],
        vec![
            Value::String("Smith".into()),
            Value::Int32(23),
            Value::Float64(3.6),
        ],
        vec![
            Value::String("Hana".into()),
            Value::Int32(21),
            Value::Float64(4.0),
        ],
    ]);
    assert_eq!(sorted_rows(&result), expected);
}

/// Scenario 7: five-table join (student schemas/rows per the original
/// test suite's `defineMultiTables`).
#[tokio::test]
async fn five_table_join() {
    let coordinator = new_cluster(5);

    build_table(
        &coordinator,
        "student",
        student_schema(),
        r#"{ "0": { "predicate": {}, "column": ["sid","name","age","grade"] } }"#,
    )
    .await;
    write_rows(&coordinator, "student", student_rows()).await;

    build_table(
        &coordinator,
        "courseRegistration",
        course_registration_schema(),
        r#"{ "1": { "predicate": {}, "column": ["sid","courseId"] } }"#,
    )
    .await;
    write_rows(
        &coordinator,
        "courseRegistration",
        course_registration_rows(),
    )
    .await;

    let teacher_schema = Schema::new(
        "teacher",
        vec![
            ColumnSchema::new("tid", DataType::Int32),
            ColumnSchema::new("courseId", DataType::Int32),
        ],
    )
    .unwrap();
    build_table(
        &coordinator,
        "teacher",
        teacher_schema,
        r#"{ "2": { "predicate": {}, "column": ["tid","courseId"] } }"#,
    )
    .await;
    write_rows(
        &coordinator,
        "teacher",
        vec![
            Row::new(vec![Value::Int32(0), Value::Int32(1)]),
            Row::new(vec![Value::Int32(1), Value::Int32(2)]),
            Row::new(vec![Value::Int32(2), Value::Int32(0)]),
        ],
    )
    .await;

    let student_class_schema = Schema::new(
        "studentClass",
        vec![
            ColumnSchema::new("sid", DataType::Int32),
            ColumnSchema::new("name", DataType::String),
            ColumnSchema::new("age", DataType::Int32),
            ColumnSchema::new("class", DataType::String),
        ],
    )
    .unwrap();
    build_table(
        &coordinator,
        "studentClass",
        student_class_schema,
        r#"{ "3": { "predicate": {}, "column": ["sid","name","age","class"] } }"#,
    )
    .await;
    write_rows(
        &coordinator,
        "studentClass",
        vec![
            Row::new(vec![
                Value::Int32(0),
                Value::String("John".into()),
                Value::Int32(22),
                Value::String("81".into()),
            ]),
            Row::new(vec![
                Value::Int32(1),
                Value::String("Smith".into()),
                Value::Int32(23),
                Value::String("82".into()),
            ]),
            Row::new(vec![
                Value::Int32(2),
                Value::String("Hana".into()),
                Value::Int32(21),
                Value::String("83".into()),
            ]),
        ],
    )
    .await;

    let teacher_school_schema = Schema::new(
        "teacherSchool",
        vec![
            ColumnSchema::new("tid", DataType::Int32),
            ColumnSchema::new("school", DataType::String),
        ],
    )
    .unwrap();
    build_table(
        &coordinator,
        "teacherSchool",
        teacher_school_schema,
        r#"{ "4": { "predicate": {}, "column": ["tid","school"] } }"#,
    )
    .await;
    write_rows(
        &coordinator,
        "teacherSchool",
        vec![
            Row::new(vec![Value::Int32(0), Value::String("SS".into())]),
            Row::new(vec![Value::Int32(1), Value::String("SEM".into())]),
            Row::new(vec![Value::Int32(2), Value::String("CS".into())]),
        ],
    )
    .await;

    let joined = coordinator
        .join(&[
            "student",
            "courseRegistration",
            "teacher",
            "studentClass",
            "teacherSchool",
        ])
        .await
        .unwrap();

    let expected = sorted_values(vec![
        vec![
            Value::Int32(0),
            Value::String("John".into()),
            Value::Int32(22),
            Value::Float64(4.0),
            Value::Int32(0),
            Value::Int32(2),
            Value::String("81".into()),
            Value::String("CS".into()),
        ],
        vec![
            Value::Int32(0),
            Value::String("John".into()),
            Value::Int32(22),
            Value::Float64(4.0),
            Value::Int32(1),
            Value::Int32(0),
            Value::String("81".into()),
            Value::String("SS".into()),
        ],
        vec![
            Value::Int32(1),
            Value::String("Smith".into()),
            Value::Int32(23),
            Value::Float64(3.6),
            Value::Int32(0),
            Value::Int32(2),
            Value::String("82".into()),
            Value::String("CS".into()),
        ],
        vec![
            Value::Int32(2),
            Value::String("Hana".into()),
            Value::Int32(21),
            Value::Float64(4.0),
            Value::Int32(2),
            Value::Int32(1),
            Value::String("83".into()),
            Value::String("SEM".into()),
        ],
    ]);
    assert_eq!(sorted_rows(&joined), expected);
}
