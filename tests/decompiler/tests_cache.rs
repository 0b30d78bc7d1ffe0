//! Build-once caching of decompiled data.

use std::sync::{Arc, Barrier};
use std::thread;

use crate::helpers::class_fixtures::*;
use clsview::decompiler::{DecompilationError, get_decompiled_data};

#[test]
fn test_concurrent_first_calls_build_once() {
    const THREADS: usize = 16;
    let unit = foo_unit();
    let barrier = Barrier::new(THREADS);

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    get_decompiled_data(&unit).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(unit.build_count(), 1);
    assert!(results.iter().all(|data| Arc::ptr_eq(data, &results[0])));
}

#[test]
fn test_data_lives_with_its_unit() {
    let first = foo_unit();
    let second = foo_unit();
    let a = get_decompiled_data(&first).unwrap();
    let b = get_decompiled_data(&second).unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(a.unit().contents(), b.unit().contents());
    assert_eq!(first.build_count(), 1);
    assert_eq!(second.build_count(), 1);
}

#[test]
fn test_failed_build_is_retried() {
    let unit = broken_unit();
    assert!(matches!(get_decompiled_data(&unit), Err(DecompilationError::ClassFile(_))));
    assert!(matches!(get_decompiled_data(&unit), Err(DecompilationError::ClassFile(_))));
    assert_eq!(unit.build_count(), 2);
}
