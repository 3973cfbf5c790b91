//! Scenario tests for the provisioning driver.
//!
//! Runs are driven against an in-memory service that records every call,
//! so each test can assert the exact call sequence and the outcome.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use bbq_client::client::GardenClient;
use bbq_client::error::{ClientError, Result as ClientResult};
use bbq_common::config::RunConfig;
use bbq_common::types::{ContainerRecord, ContainerSpec, DiskLimits, Handle, Properties};
use bbq_driver::error::DriverError;
use bbq_driver::report::Phase;

/// One call observed by the fake service.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Create(String, Option<DiskLimits>),
    List,
    Destroy(String),
}

/// In-memory container service with injectable failures.
#[derive(Default)]
struct FakeGarden {
    calls: RefCell<Vec<(Call, Instant)>>,
    containers: RefCell<BTreeSet<Handle>>,
    fail_create: Option<String>,
    fail_list: bool,
    fail_destroy: Option<String>,
    list_override: Option<usize>,
}

impl FakeGarden {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().iter().map(|(c, _)| c.clone()).collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push((call, Instant::now()));
    }

    fn rejected(operation: &'static str, message: &str) -> ClientError {
        ClientError::Service {
            operation,
            status: 500,
            kind: None,
            message: message.to_string(),
        }
    }
}

impl GardenClient for FakeGarden {
    fn create(&self, spec: &ContainerSpec) -> ClientResult<ContainerRecord> {
        self.record(Call::Create(spec.handle.to_string(), spec.limits.disk));
        if self.fail_create.as_deref() == Some(spec.handle.as_str()) {
            return Err(Self::rejected("create container", "insufficient disk"));
        }
        let _ = self.containers.borrow_mut().insert(spec.handle.clone());
        Ok(ContainerRecord {
            handle: spec.handle.clone(),
        })
    }

    fn list(&self, properties: &Properties) -> ClientResult<Vec<ContainerRecord>> {
        assert!(properties.is_empty(), "verify must list without a filter");
        self.record(Call::List);
        if self.fail_list {
            return Err(Self::rejected("list containers", "connection reset"));
        }
        let records: Vec<_> = self
            .containers
            .borrow()
            .iter()
            .map(|h| ContainerRecord { handle: h.clone() })
            .collect();
        Ok(match self.list_override {
            Some(n) => records.into_iter().take(n).collect(),
            None => records,
        })
    }

    fn destroy(&self, handle: &Handle) -> ClientResult<()> {
        self.record(Call::Destroy(handle.to_string()));
        if self.fail_destroy.as_deref() == Some(handle.as_str()) {
            return Err(Self::rejected("destroy container", "device busy"));
        }
        let _ = self.containers.borrow_mut().remove(handle);
        Ok(())
    }
}

fn config(num_containers: usize) -> RunConfig {
    RunConfig {
        num_containers,
        ..RunConfig::default()
    }
}

fn creates(handles: &[&str]) -> Vec<Call> {
    handles
        .iter()
        .map(|h| Call::Create((*h).to_string(), None))
        .collect()
}

fn destroys(handles: &[&str]) -> Vec<Call> {
    handles
        .iter()
        .map(|h| Call::Destroy((*h).to_string()))
        .collect()
}

#[test]
fn three_containers_all_succeed() {
    let garden = FakeGarden::default();
    let mut progress = Vec::new();

    let report = bbq_driver::run(&config(3), &garden, &mut progress).expect("run succeeds");

    let mut expected = creates(&["bbq-0", "bbq-1", "bbq-2"]);
    expected.push(Call::List);
    expected.extend(destroys(&["bbq-0", "bbq-1", "bbq-2"]));
    assert_eq!(garden.calls(), expected);
    assert!(garden.containers.borrow().is_empty());
    assert_eq!(report.containers, 3);
    assert!(report.wait.is_none());
    assert_eq!(String::from_utf8(progress).unwrap(), "...\n...\n");
}

#[test]
fn create_failure_stops_run_without_destroying() {
    let garden = FakeGarden {
        fail_create: Some("bbq-2".into()),
        ..FakeGarden::default()
    };
    let mut progress = Vec::new();

    let err = bbq_driver::run(&config(5), &garden, &mut progress).expect_err("run must fail");

    assert_eq!(garden.calls(), creates(&["bbq-0", "bbq-1", "bbq-2"]));
    match &err {
        DriverError::Create { handle, .. } => assert_eq!(handle.as_str(), "bbq-2"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.phase(), Phase::Create);
    assert!(err.to_string().contains("bbq-2"));
    assert!(err.to_string().contains("insufficient disk"));
    assert_eq!(garden.containers.borrow().len(), 2, "no rollback of earlier creates");
}

#[test]
fn count_mismatch_is_fatal_before_any_destroy() {
    let garden = FakeGarden {
        list_override: Some(3),
        ..FakeGarden::default()
    };
    let mut progress = Vec::new();

    let err = bbq_driver::run(&config(4), &garden, &mut progress).expect_err("run must fail");

    let mut expected = creates(&["bbq-0", "bbq-1", "bbq-2", "bbq-3"]);
    expected.push(Call::List);
    assert_eq!(garden.calls(), expected);
    assert!(matches!(
        err,
        DriverError::CountMismatch {
            expected: 4,
            actual: 3
        }
    ));
    assert_eq!(err.to_string(), "expected to find 4 containers, but found 3");
}

#[test]
fn preexisting_containers_cause_mismatch() {
    let garden = FakeGarden::default();
    let _ = garden
        .containers
        .borrow_mut()
        .insert(Handle::new("someone-else"));
    let mut progress = Vec::new();

    let err = bbq_driver::run(&config(2), &garden, &mut progress).expect_err("run must fail");

    assert!(matches!(
        err,
        DriverError::CountMismatch {
            expected: 2,
            actual: 3
        }
    ));
    assert!(!garden.calls().iter().any(|c| matches!(c, Call::Destroy(_))));
}

#[test]
fn list_failure_is_fatal_before_any_destroy() {
    let garden = FakeGarden {
        fail_list: true,
        ..FakeGarden::default()
    };
    let mut progress = Vec::new();

    let err = bbq_driver::run(&config(2), &garden, &mut progress).expect_err("run must fail");

    assert!(matches!(err, DriverError::List { .. }));
    assert_eq!(err.phase(), Phase::Verify);
    assert_eq!(garden.calls().last(), Some(&Call::List));
}

#[test]
fn destroy_failure_stops_remaining_destroys() {
    let garden = FakeGarden {
        fail_destroy: Some("bbq-1".into()),
        ..FakeGarden::default()
    };
    let mut progress = Vec::new();

    let err = bbq_driver::run(&config(3), &garden, &mut progress).expect_err("run must fail");

    let mut expected = creates(&["bbq-0", "bbq-1", "bbq-2"]);
    expected.push(Call::List);
    expected.extend(destroys(&["bbq-0", "bbq-1"]));
    assert_eq!(garden.calls(), expected);
    match &err {
        DriverError::Destroy { handle, .. } => assert_eq!(handle.as_str(), "bbq-1"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn disk_limits_are_attached_to_every_create() {
    let garden = FakeGarden::default();
    let cfg = RunConfig {
        num_containers: 2,
        enable_disk_limits: true,
        ..RunConfig::default()
    };
    let mut progress = Vec::new();

    let _ = bbq_driver::run(&cfg, &garden, &mut progress).expect("run succeeds");

    let limits = Some(DiskLimits {
        byte_soft: 10_000_000,
        byte_hard: 20_000_000,
    });
    let created: Vec<_> = garden
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Create(..)))
        .collect();
    assert_eq!(
        created,
        vec![
            Call::Create("bbq-0".into(), limits),
            Call::Create("bbq-1".into(), limits),
        ]
    );
}

#[test]
fn destroy_delay_separates_verify_and_destroy() {
    let garden = FakeGarden::default();
    let delay = Duration::from_millis(300);
    let cfg = RunConfig {
        num_containers: 1,
        destroy_delay: delay,
        ..RunConfig::default()
    };
    let mut progress = Vec::new();

    let report = bbq_driver::run(&cfg, &garden, &mut progress).expect("run succeeds");

    let calls = garden.calls.borrow();
    let listed_at = calls
        .iter()
        .find(|(c, _)| *c == Call::List)
        .map(|(_, at)| *at)
        .expect("list call");
    let destroyed_at = calls
        .iter()
        .find(|(c, _)| matches!(c, Call::Destroy(_)))
        .map(|(_, at)| *at)
        .expect("destroy call");
    assert!(destroyed_at.duration_since(listed_at) >= delay);
    assert!(report.wait.expect("wait recorded") >= delay);
}

#[test]
fn zero_containers_lists_once_and_succeeds() {
    let garden = FakeGarden::default();
    let mut progress = Vec::new();

    let report = bbq_driver::run(&config(0), &garden, &mut progress).expect("run succeeds");

    assert_eq!(garden.calls(), vec![Call::List]);
    assert_eq!(report.mean_create(), None);
}
