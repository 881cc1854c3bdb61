mod common;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

const YEAR: i32 = 2025;
const EXAM: &str = "final";

/// A class id no earlier run has used, so each test owns its cohort.
fn fresh_class() -> String {
    format!("c-{}", &Uuid::new_v4().simple().to_string()[..12])
}

fn result_body(roll: &str, class_id: &str, written: u32, mcq: u32) -> Value {
    json!({
        "roll": roll,
        "name": format!("Student {roll}"),
        "class": class_id,
        "examType": EXAM,
        "year": YEAR,
        "marks": {
            "Math": { "written": written, "mcq": mcq },
            "Bangla": { "written": 40 }
        }
    })
}

async fn publish(
    client: &Client,
    url: &str,
    token: &str,
    body: &Value,
) -> Result<(StatusCode, Value)> {
    let res = client.post(url).bearer_auth(token).json(body).send().await?;
    let status = res.status();
    Ok((status, res.json().await?))
}

/// Totals: 1 -> 130, 2 -> 115, 3 -> 115, 4 -> fails Math written, 5 -> 100.
async fn publish_cohort(client: &Client, url: &str, token: &str, class_id: &str) -> Result<()> {
    for (roll, written, mcq) in [("1", 60, 30), ("2", 50, 25), ("3", 45, 30), ("4", 20, 40), ("5", 40, 20)] {
        let (status, body) = publish(client, url, token, &result_body(roll, class_id, written, mcq)).await?;
        assert_eq!(status, StatusCode::CREATED, "roll {roll}: {body}");
    }
    Ok(())
}

async fn delete_cohort(client: &Client, server: &common::TestServer, token: &str, class_id: &str) -> Result<()> {
    let listed: Value = client
        .get(server.url(&format!("/results?class={class_id}&examType={EXAM}&year={YEAR}")))
        .send()
        .await?
        .json()
        .await?;

    for row in listed["data"].as_array().cloned().unwrap_or_default() {
        let id = row["id"].as_str().unwrap_or_default();
        let res = client
            .delete(server.url(&format!("/results/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }
    Ok(())
}

#[tokio::test]
async fn second_result_for_same_student_is_conflict() -> Result<()> {
    let Some(server) = common::ensure_database_server().await? else {
        return Ok(());
    };
    let client = Client::new();
    let token = common::admin_token()?;
    let class_id = fresh_class();
    let url = server.url("/results");

    let (status, first) = publish(&client, &url, &token, &result_body("7", &class_id, 50, 20)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["data"]["roll"], "7");

    let (status, second) = publish(&client, &url, &token, &result_body("7", &class_id, 70, 25)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(second["code"], "CONFLICT");
    assert_eq!(second["message"], "Result already exists");

    delete_cohort(&client, &server, &token, &class_id).await
}

#[tokio::test]
async fn merit_query_tells_missing_from_failed() -> Result<()> {
    let Some(server) = common::ensure_database_server().await? else {
        return Ok(());
    };
    let client = Client::new();
    let token = common::admin_token()?;
    let class_id = fresh_class();
    publish_cohort(&client, &server.url("/results"), &token, &class_id).await?;

    let query = |roll: &str| server.url(&format!("/results/student/{roll}/{class_id}/{EXAM}/{YEAR}"));

    let res = client.get(query("3")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["roll"], "3");
    assert_eq!(body["data"]["totalMarks"], 115);
    assert_eq!(body["data"]["meritPosition"], 2);

    let res = client.get(query("4")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["totalMarks"], 100);
    assert_eq!(body["data"]["meritPosition"], "Fail");

    let res = client.get(query("99")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "NOT_FOUND");

    delete_cohort(&client, &server, &token, &class_id).await
}

#[tokio::test]
async fn merit_list_shares_rank_between_tied_students() -> Result<()> {
    let Some(server) = common::ensure_database_server().await? else {
        return Ok(());
    };
    let client = Client::new();
    let token = common::admin_token()?;
    let class_id = fresh_class();
    publish_cohort(&client, &server.url("/results"), &token, &class_id).await?;

    let res = client
        .get(server.url(&format!("/results/merit/{class_id}/{EXAM}/{YEAR}")))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;

    let entries = body["data"].as_array().cloned().unwrap_or_default();
    let order: Vec<(String, Value)> = entries
        .iter()
        .map(|e| (e["roll"].as_str().unwrap_or_default().to_string(), e["meritPosition"].clone()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("1".to_string(), json!(1)),
            ("2".to_string(), json!(2)),
            ("3".to_string(), json!(2)),
            ("5".to_string(), json!(4)),
            ("4".to_string(), json!("Fail")),
        ]
    );

    delete_cohort(&client, &server, &token, &class_id).await
}

#[tokio::test]
async fn taken_student_id_is_replaced() -> Result<()> {
    let Some(server) = common::ensure_database_server().await? else {
        return Ok(());
    };
    let client = Client::new();
    let token = common::admin_token()?;
    let class_id = fresh_class();
    let url = server.url("/students");

    let student = |birth_reg: &str, student_id: Option<&str>| {
        json!({
            "studentId": student_id,
            "name": "Karim",
            "birthReg": birth_reg,
            "class": class_id,
            "year": YEAR
        })
    };

    let res = client
        .post(&url)
        .bearer_auth(&token)
        .json(&student(&format!("{class_id}-a"), None))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let first: Value = res.json().await?;
    let taken = first["data"]["studentId"].as_str().unwrap_or_default().to_string();
    assert_eq!(taken.len(), 5);

    let res = client
        .post(&url)
        .bearer_auth(&token)
        .json(&student(&format!("{class_id}-b"), Some(&taken)))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let second: Value = res.json().await?;
    let assigned = second["data"]["studentId"].as_str().unwrap_or_default();
    assert_ne!(assigned, taken);
    assert_eq!(assigned.len(), 5);

    // Same birth registration in the same class and year is a duplicate student.
    let res = client
        .post(&url)
        .bearer_auth(&token)
        .json(&student(&format!("{class_id}-a"), None))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Student already exists");

    for created in [&first, &second] {
        let id = created["data"]["id"].as_str().unwrap_or_default();
        let res = client
            .delete(server.url(&format!("/students/{id}")))
            .bearer_auth(&token)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }
    Ok(())
}
