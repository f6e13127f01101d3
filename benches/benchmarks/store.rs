use std::fs;
use std::time::{Duration, SystemTime};

use criterion::Criterion;
use rand::seq::SliceRandom;
use tempdir::TempDir;

use filestore::FileStore;

pub fn bench(c: &mut Criterion) {
    let mut pairs: Vec<(String, String)> = (1..200).map(|x| (format!("k_{}", x), format!("val_{}", x))).collect();
    let dir = TempDir::new("filestore-").unwrap();
    let path = dir.path().join("bench.conf");
    let store = FileStore::open(&path).unwrap();

    let mut round = 0u64;
    c.bench_function("store.write", |b| b.iter(|| {
        round += 1;
        for (k, v) in pairs.iter() {
            store.write(k, &format!("{v}_{round}")).unwrap();
        }
    }));

    let mut rng = rand::thread_rng();
    pairs.shuffle(&mut rng);

    c.bench_function("store.read", |b| b.iter(|| {
        for (k, _) in pairs.iter() {
            store.read(k, None);
        }
    }));

    let file = fs::File::options().write(true).open(&path).unwrap();
    let mut bump = 0u64;
    c.bench_function("store.read_reload", |b| b.iter(|| {
        bump += 1;
        file.set_modified(SystemTime::now() + Duration::from_secs(bump)).unwrap();
        store.read("k_1", None);
    }));
}
