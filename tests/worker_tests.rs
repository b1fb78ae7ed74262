/* tests/worker_tests.rs */

#![cfg(feature = "worker")]

use std::time::Duration;

use ledgerstore::config::EngineConfig;
use ledgerstore::engine::{Notice, ProtocolError};
use ledgerstore::model::{Bucket, BucketNames};
use ledgerstore::worker::{Worker, WorkerError};
use tokio::sync::broadcast;

const META: &str = r#"[{"segmentId":0,"length":1,"nextLocalId":1,"loaded":true}]"#;
const SEGMENT: &str = r#"[["0.0",9.99,"Class",1700000000,"","1.2.12"]]"#;
const CATEGORIES: &str = r##"[["2","Health","#f00","heart","1","12"]]"##;

async fn next_notice(rx: &mut broadcast::Receiver<Notice>) -> Notice {
	tokio::time::timeout(Duration::from_secs(5), rx.recv())
		.await
		.expect("timed out waiting for a notice")
		.expect("notice channel closed")
}

async fn seeded_worker() -> Result<(Worker, broadcast::Receiver<Notice>), WorkerError> {
	let worker = Worker::spawn(EngineConfig::default());
	let rx = worker.subscribe();
	worker.init(BucketNames::default()).await?;
	worker.direct_set("TRANSACTIONS_META", META).await?;
	worker.direct_set("TRANSACTIONS0", SEGMENT).await?;
	worker.direct_set("CATEGORIES", CATEGORIES).await?;
	Ok((worker, rx))
}

#[tokio::test]
async fn test_back_to_back_saves_each_notify() -> Result<(), Box<dyn std::error::Error>> {
	let (worker, mut rx) = seeded_worker().await?;

	worker.save("SUB_CATEGORIES", r#"[["12","Gym","2"],["99","Unused","2"]]"#).await?;
	worker.save("SUB_CATEGORIES", r#"[["12","Gym","2"],["98","Other","2"]]"#).await?;

	let first = next_notice(&mut rx).await;
	let second = next_notice(&mut rx).await;

	match (&first, &second) {
		(
			Notice::Saved { removed: a, payload: pa, .. },
			Notice::Saved { removed: b, payload: pb, .. },
		) => {
			assert_eq!(a, &vec!["99".to_string()]);
			assert_eq!(b, &vec!["98".to_string()]);
			assert_eq!(pa, pb);
		}
		other => panic!("expected two Saved notices, got {other:?}"),
	}

	let cached = worker.snapshot(Bucket::SubCategories).unwrap();
	assert_eq!(&*cached, r#"[["12","Gym","2"]]"#);
	Ok(())
}

#[tokio::test]
async fn test_notices_follow_enqueue_order() -> Result<(), Box<dyn std::error::Error>> {
	let (worker, mut rx) = seeded_worker().await?;

	worker.save("SUB_CATEGORIES", "[]").await?;
	worker.save("CATEGORIES", CATEGORIES).await?;
	worker.save("TRANSACTIONS0", SEGMENT).await?;
	worker.save("ACCOUNTS", r#"[["1","Cash",1,"2"]]"#).await?;

	let mut order = Vec::new();
	for _ in 0..4 {
		let notice = next_notice(&mut rx).await;
		assert!(matches!(notice, Notice::Saved { .. }), "{notice:?}");
		order.push(notice.bucket().unwrap_or_default().to_string());
	}
	assert_eq!(order, vec!["SUB_CATEGORIES", "CATEGORIES", "TRANSACTIONS0", "ACCOUNTS"]);
	Ok(())
}

#[tokio::test]
async fn test_direct_set_waits_for_the_saves_ahead_of_it() -> Result<(), Box<dyn std::error::Error>> {
	let (worker, mut rx) = seeded_worker().await?;
	let subs = r#"[["12","Gym","2"],["77","Swim","2"]]"#;

	// Nothing below yields to the worker, so all four land in one burst.
	worker.save("SUB_CATEGORIES", subs).await?;
	worker.save("SUB_CATEGORIES", subs).await?;
	worker
		.direct_set("CATEGORIES", r##"[["2","Health","#f00","heart","1","12,77"]]"##)
		.await?;
	worker.save("SUB_CATEGORIES", subs).await?;

	let mut removed = Vec::new();
	for _ in 0..3 {
		match next_notice(&mut rx).await {
			Notice::Saved {
				bucket,
				removed: ids,
				..
			} => {
				assert_eq!(bucket, "SUB_CATEGORIES");
				removed.push(ids);
			}
			other => panic!("expected Saved, got {other:?}"),
		}
	}

	// The first two saves ran against the categories seeded before the burst.
	assert_eq!(removed[0], vec!["77".to_string()]);
	assert_eq!(removed[1], vec!["77".to_string()]);
	assert!(removed[2].is_empty());

	let cached = worker.snapshot(Bucket::SubCategories).unwrap();
	assert_eq!(&*cached, subs);
	Ok(())
}

#[tokio::test]
async fn test_save_before_init_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
	let worker = Worker::spawn(EngineConfig::default());
	let mut rx = worker.subscribe();

	worker.save("ACCOUNTS", "[]").await?;
	assert_eq!(
		next_notice(&mut rx).await,
		Notice::Rejected {
			error: ProtocolError::NotInitialized
		}
	);

	// The worker keeps serving after a rejection.
	worker.init(BucketNames::default()).await?;
	worker.direct_set("TRANSACTIONS_META", "[]").await?;
	worker.save("ACCOUNTS", r#"[["1","Cash",1,""]]"#).await?;
	assert!(matches!(next_notice(&mut rx).await, Notice::Saved { .. }));
	Ok(())
}

#[tokio::test]
async fn test_failed_item_does_not_block_the_queue() -> Result<(), Box<dyn std::error::Error>> {
	let (worker, mut rx) = seeded_worker().await?;

	worker.save("ACCOUNTS", "[[").await?;
	worker.save("CATEGORIES", CATEGORIES).await?;

	assert!(matches!(next_notice(&mut rx).await, Notice::Failed { .. }));
	assert!(matches!(next_notice(&mut rx).await, Notice::Saved { .. }));
	assert!(worker.snapshot(Bucket::Accounts).is_none());
	Ok(())
}

#[tokio::test]
async fn test_wire_messages() -> Result<(), Box<dyn std::error::Error>> {
	let worker = Worker::spawn(EngineConfig::default());
	let mut rx = worker.subscribe();

	let err = worker.send_wire("{\"type\":").await.unwrap_err();
	assert!(matches!(err, WorkerError::Protocol(ProtocolError::Malformed { .. })));

	worker
		.send_wire(r#"{"type":"init","buckets":{"ACCOUNTS":"a","CATEGORIES":"c","SUB_CATEGORIES":"s","TRANSACTIONS_META":"m","TRANSACTIONS":"t"}}"#)
		.await?;
	worker.send_wire(r#"{"type":"directSet","bucket":"m","value":"[]"}"#).await?;
	worker.send_wire(r##"{"type":"save","bucket":"c","payload":"[[\"4\",\"Fun\",\"#0f0\",\"star\",\"1\",\"\"]]"}"##).await?;

	let notice = next_notice(&mut rx).await;
	let wire: serde_json::Value = serde_json::from_str(&notice.to_wire()?)?;
	assert_eq!(wire["type"], "saved");
	assert_eq!(wire["bucket"], "c");
	assert_eq!(wire["removed"][0], "4");
	Ok(())
}

#[tokio::test]
async fn test_stopped_worker_is_closed() {
	let worker = Worker::spawn(EngineConfig::default());
	worker.stop();

	for _ in 0..50 {
		if !worker.is_running() {
			break;
		}
		tokio::time::sleep(Duration::from_millis(10)).await;
	}

	assert!(!worker.is_running());
	assert_eq!(worker.collect().await, Err(WorkerError::Closed));
}

#[cfg(feature = "stream")]
#[tokio::test]
async fn test_notice_stream() -> Result<(), Box<dyn std::error::Error>> {
	use futures_util::StreamExt;

	let (worker, _rx) = seeded_worker().await?;
	let mut stream = worker.stream();

	worker.collect().await?;

	let notice = tokio::time::timeout(Duration::from_secs(5), stream.next())
		.await?
		.expect("stream ended")?;
	assert_eq!(notice.bucket(), Some("CATEGORIES"));
	Ok(())
}
