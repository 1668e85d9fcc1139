use std::time::Duration;

use crate::client::Error;
use crate::serializer::{JsonSerializer, StringSerializer};
use crate::template::KeyType;

macro_rules! test_template {
    () => {
        match std::env::var("REDIS_URL") {
            Ok(url) => crate::Template::new(1, &url).await.unwrap(),
            Err(_) => return Ok(()),
        }
    };
}

#[tokio::test]
async fn bound_views_match_unbound_calls() -> Result<(), Error> {
    let template = test_template!();

    let key = "unittest_template_bound_1";
    template.del(&[key]).await?;
    template.value_ops().set(key, "seven").await?;
    let direct: Option<String> = template.value_ops().get(key).await?;
    let bound: Option<String> = template.bound_value_ops(key).get().await?;
    assert_eq!(direct, bound);
    template.del(&[key]).await?;

    let key = "unittest_template_bound_2";
    template.del(&[key]).await?;
    template.bound_list_ops(key).rpush(&["a", "b", "c"]).await?;
    let direct: Vec<String> = template.list_ops().lrange(key, 0, -1).await?;
    let bound: Vec<String> = template.bound_list_ops(key).lrange(0, -1).await?;
    assert_eq!(direct, bound);
    assert_eq!(3, bound.len());
    template.del(&[key]).await?;

    let key = "unittest_template_bound_3";
    template.del(&[key]).await?;
    template.bound_hash_ops(key).hset("lang", "rust").await?;
    let direct: Option<String> = template.hash_ops().hget(key, "lang").await?;
    let bound: Option<String> = template.bound_hash_ops(key).hget("lang").await?;
    assert_eq!(direct, bound);
    assert_eq!(Some("rust".to_owned()), bound);
    template.del(&[key]).await?;

    let key = "unittest_template_bound_4";
    template.del(&[key]).await?;
    template.bound_zset_ops(key).zadd(1.0, "one").await?;
    template.bound_zset_ops(key).zadd(2.0, "two").await?;
    let direct: Vec<(String, f64)> = template.zset_ops().zrange_with_scores(key, 0, -1).await?;
    let bound: Vec<(String, f64)> = template.bound_zset_ops(key).zrange_with_scores(0, -1).await?;
    assert_eq!(direct, bound);
    template.del(&[key]).await?;

    Ok(())
}

#[tokio::test]
async fn ttl_states() -> Result<(), Error> {
    let template = test_template!();
    let key = "unittest_template_ttl_1";

    template.del(&[key]).await?;
    assert!(template.ttl(key).await?.is_missing());

    template.value_ops().set(key, "value").await?;
    assert!(template.ttl(key).await?.is_persistent());

    assert!(template.expire(key, Duration::from_secs(30)).await?);
    let remaining = template.ttl(key).await?.duration().unwrap();
    assert!(remaining <= Duration::from_secs(30));
    assert!(remaining > Duration::from_secs(25));

    assert!(template.persist(key).await?);
    assert!(template.ttl(key).await?.is_persistent());

    template.del(&[key]).await?;
    Ok(())
}

#[tokio::test]
async fn key_type_reporting() -> Result<(), Error> {
    let template = test_template!();
    let key = "unittest_template_type_1";

    template.del(&[key]).await?;
    assert_eq!(KeyType::None, template.key_type(key).await?);

    template.value_ops().set(key, "value").await?;
    assert_eq!(KeyType::String, template.key_type(key).await?);
    template.del(&[key]).await?;

    template.list_ops().rpush(key, &["value"]).await?;
    assert_eq!(KeyType::List, template.key_type(key).await?);
    template.del(&[key]).await?;

    Ok(())
}

#[tokio::test]
async fn transaction_aborts_and_commits() -> Result<(), Error> {
    let template = test_template!();
    let key = "unittest_template_txn_1";
    template.del(&[key]).await?;

    let mut session = template.session().await?;
    session.watch(&[key]).await?;
    session.multi().await?;
    let mut cmd = crate::resp::Command::new("SET");
    cmd.arg_str(key).arg_str("42");
    session.queue(&cmd).await?;
    let replies = session.exec().await?;
    assert!(replies.is_some());
    drop(session);

    let res: Option<String> = template.value_ops().get(key).await?;
    assert_eq!(Some("42".to_owned()), res);
    template.del(&[key]).await?;

    let mut session = template.session().await?;
    session.multi().await?;
    let mut cmd = crate::resp::Command::new("SET");
    cmd.arg_str(key).arg_str("later");
    session.queue(&cmd).await?;
    session.discard().await?;
    drop(session);
    assert!(!template.exists_one(key).await?);

    Ok(())
}

#[tokio::test]
async fn json_values_round_trip() -> Result<(), Error> {
    let template = test_template!();
    let template = template.with_serializers(StringSerializer, JsonSerializer);
    let key = "unittest_template_json_1";

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Session {
        user: String,
        logins: u32,
        active: bool,
    }

    let session = Session {
        user: "aki".into(),
        logins: 3,
        active: true,
    };
    template.value_ops().set(key, &session).await?;
    let fetched: Option<Session> = template.value_ops().get(key).await?;
    assert_eq!(Some(session), fetched);

    template.del(&[key]).await?;
    Ok(())
}

#[tokio::test]
async fn scan_finds_written_keys() -> Result<(), Error> {
    let template = test_template!();
    let keys = [
        "unittest_template_scan_1",
        "unittest_template_scan_2",
        "unittest_template_scan_3",
    ];

    for key in keys {
        template.value_ops().set(key, "value").await?;
    }

    let mut found: Vec<String> = vec![];
    let mut cursor = 0;
    loop {
        let (next, page) = template
            .scan(cursor, Some("unittest_template_scan_*"), None)
            .await?;
        found.extend(page);
        cursor = next;
        if cursor == 0 {
            break;
        }
    }
    found.sort();
    assert_eq!(
        keys.iter().map(|key| key.to_string()).collect::<Vec<_>>(),
        found,
    );

    template.del(&keys).await?;
    Ok(())
}
