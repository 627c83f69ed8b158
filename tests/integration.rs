//! 链式哈希表集成测试

use chained_hashtable::{
    bench::{self, BenchConfig},
    dictionary::{self, Dictionary},
    hash_strategy, ConstantStrategy, Crc32Strategy, HashAlgorithm, HashStrategy, HashTable,
    HashTableConfig, KeyArena, Loaded,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::path::PathBuf;
use test_log::test;

const SEED: u64 = 42;
const WORD_COUNT: usize = 5_000;

/// 生成互不相同的随机小写单词, 前一半插入, 后一半只用于查找
fn generate_words(count: usize) -> (Vec<Vec<u8>>, Vec<Vec<u8>>) {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut seen = HashSet::new();
    let mut words = Vec::with_capacity(count);
    while words.len() < count {
        let len = rng.gen_range(1..=12);
        let word: Vec<u8> = (0..len).map(|_| rng.gen_range(b'a'..=b'z')).collect();
        if seen.insert(word.clone()) {
            words.push(word);
        }
    }
    let absent = words.split_off(count / 2);
    (words, absent)
}

fn load<'k, S: HashStrategy>(table: &mut HashTable<'k, S, Loaded>, words: &'k [Vec<u8>]) {
    table.extend_forced(words.iter().map(Vec::as_slice));
}

fn dictionary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/dictionary.txt")
}

#[test]
fn test_inserted_keys_found_before_and_after_compaction() {
    let (present, absent) = generate_words(WORD_COUNT);
    let mut table = HashTable::new(1907, Crc32Strategy).unwrap();
    load(&mut table, &present);

    for word in &present {
        assert!(table.find(word), "压缩前应能找到 {:?}", word);
    }

    let mut arena = KeyArena::for_table(&table).unwrap();
    let table = table.compact_into(&mut arena).unwrap();

    for word in &present {
        assert!(table.find(word), "压缩后应能找到 {:?}", word);
    }
    for word in &absent {
        assert!(!table.find(word), "未插入的键不应被找到 {:?}", word);
    }
}

#[test]
fn test_absent_keys_for_every_size() {
    let (present, absent) = generate_words(400);
    for size in [1, 2, 3, 7, 64, 1907] {
        let mut table = HashTable::new(size, Crc32Strategy).unwrap();
        load(&mut table, &present);
        assert!(present.iter().all(|w| table.find(w)), "size={size}");
        assert!(absent.iter().all(|w| !table.find(w)), "size={size}");
    }
}

#[test]
fn test_every_strategy_agrees() {
    let (present, absent) = generate_words(1_000);
    for algorithm in HashAlgorithm::ALL {
        let mut table = HashTable::new(97, hash_strategy(algorithm)).unwrap();
        load(&mut table, &present);
        let mut arena = KeyArena::for_table(&table).unwrap();
        let table = table.compact_into(&mut arena).unwrap();
        assert!(present.iter().all(|w| table.find(w)), "{}", algorithm.as_str());
        assert!(absent.iter().all(|w| !table.find(w)), "{}", algorithm.as_str());
    }
}

#[test]
fn test_compaction_preserves_each_chain() {
    let (present, _) = generate_words(2_000);
    let mut table = HashTable::new(31, Crc32Strategy).unwrap();
    load(&mut table, &present);

    let before: Vec<Vec<Vec<u8>>> = (0..table.bucket_count())
        .map(|b| table.chain(b).map(|(_, n)| n.key().to_vec()).collect())
        .collect();
    let before_ids: Vec<Vec<_>> = (0..table.bucket_count())
        .map(|b| table.chain(b).map(|(id, _)| id).collect())
        .collect();

    let mut arena = KeyArena::for_table(&table).unwrap();
    let table = table.compact_into(&mut arena).unwrap();

    for bucket in 0..table.bucket_count() {
        let after: Vec<Vec<u8>> = table.chain(bucket).map(|(_, n)| n.key().to_vec()).collect();
        let after_ids: Vec<_> = table.chain(bucket).map(|(id, _)| id).collect();
        assert_eq!(before[bucket], after, "桶 {bucket} 的键内容应保持不变");
        assert_eq!(before_ids[bucket], after_ids, "桶 {bucket} 的链接应保持不变");
    }
}

#[test]
fn test_arena_is_exact_and_contiguous() {
    let (present, _) = generate_words(1_000);
    let mut table = HashTable::new(53, Crc32Strategy).unwrap();
    load(&mut table, &present);

    let expected: usize = present.iter().map(|w| w.len() + 1).sum();
    assert_eq!(table.encoded_key_bytes(), expected);

    let mut arena = KeyArena::for_table(&table).unwrap();
    assert_eq!(arena.capacity(), expected);
    let table = table.compact_into(&mut arena).unwrap();

    // 按桶顺序遍历的键在压缩区中首尾相接
    let mut cursor = None;
    let mut layout = Vec::with_capacity(expected);
    for key in table.keys() {
        let start = key.as_ptr() as usize;
        if let Some(expected_start) = cursor {
            assert_eq!(start, expected_start, "相邻键应连续存放");
        }
        cursor = Some(start + key.len() + 1);
        layout.extend_from_slice(key);
        layout.push(0);
    }
    drop(table);
    assert_eq!(arena.len(), expected);
    assert_eq!(arena.remaining(), 0);
    assert_eq!(arena.as_bytes(), layout.as_slice());
}

#[test]
#[should_panic(expected = "键压缩区过小")]
fn test_undersized_arena_is_rejected() {
    let (present, _) = generate_words(100);
    let mut table = HashTable::new(7, Crc32Strategy).unwrap();
    load(&mut table, &present);
    let mut arena = KeyArena::allocate(table.encoded_key_bytes() - 1).unwrap();
    let _ = table.compact_into(&mut arena);
}

#[test]
fn test_duplicates_are_independent_nodes() {
    let first = b"echo".to_vec();
    let second = b"echo".to_vec();
    let mut table = HashTable::new(7, Crc32Strategy).unwrap();
    table.insert_forced(&first);
    table.insert_forced(&second);

    assert_eq!(table.len(), 2);
    assert_eq!(table.count(b"echo"), 2);
    let bucket = table.bucket_of(b"echo");
    let ptrs: Vec<*const u8> = table
        .chain(bucket)
        .map(|(_, n)| n.key().as_ptr())
        .collect();
    assert_eq!(ptrs, vec![second.as_ptr(), first.as_ptr()], "两个副本各自引用自己的存储");

    let mut arena = KeyArena::for_table(&table).unwrap();
    let table = table.compact_into(&mut arena).unwrap();
    assert_eq!(table.count(b"echo"), 2);
    assert!(table.find(b"echo"));
}

#[test]
fn test_reference_scenario_with_source_dropped() {
    let mut arena;
    let table = {
        let source = String::from("cat\ndog\ncow\nox\n");
        let mut table = HashTable::new(7, Crc32Strategy).unwrap();
        table.extend_forced(dictionary::tokenize(source.as_bytes()));

        assert!(table.find(b"dog"));
        assert!(!table.find(b"pig"));
        assert_eq!(table.encoded_key_bytes(), 3 + 3 + 3 + 2 + 4);

        arena = KeyArena::allocate(3 + 3 + 3 + 2 + 4).unwrap();
        table.compact_into(&mut arena).unwrap()
        // source 在此释放
    };

    for word in ["cat", "dog", "cow", "ox"] {
        assert!(table.find(word.as_bytes()), "{word} 应在源缓冲区释放后仍可找到");
    }
    assert!(!table.find(b"pig"));
}

#[test]
fn test_single_bucket_degenerate_table() {
    let (present, absent) = generate_words(300);
    let mut table = HashTable::new(1, Crc32Strategy).unwrap();
    load(&mut table, &present);
    assert_eq!(table.chains()[0].len(), present.len());

    let mut arena = KeyArena::for_table(&table).unwrap();
    let table = table.compact_into(&mut arena).unwrap();
    assert!(present.iter().all(|w| table.find(w)));
    assert!(absent.iter().all(|w| !table.find(w)));
    assert_eq!(table.chain_stats().longest_chain, present.len());
}

#[test]
fn test_constant_hash_matches_good_hash() {
    let (present, absent) = generate_words(200);
    let mut bad = HashTable::new(64, ConstantStrategy(u64::MAX)).unwrap();
    let mut good = HashTable::new(64, Crc32Strategy).unwrap();
    load(&mut bad, &present);
    load(&mut good, &present);
    for word in present.iter().chain(&absent) {
        assert_eq!(bad.find(word), good.find(word));
    }
    assert_eq!(bad.chain_stats().empty_chains, 63);
}

#[test]
fn test_repeated_lookups_do_not_mutate() {
    let (present, absent) = generate_words(500);
    let mut table = HashTable::new(101, Crc32Strategy).unwrap();
    load(&mut table, &present);
    let mut arena = KeyArena::for_table(&table).unwrap();
    let table = table.compact_into(&mut arena).unwrap();

    let hits: Vec<&[u8]> = present.iter().map(Vec::as_slice).collect();
    let misses: Vec<&[u8]> = absent.iter().map(Vec::as_slice).collect();
    let snapshot = table.to_string();
    let stats = table.chain_stats();
    for _ in 0..5 {
        assert_eq!(bench::search_pass(&table, &hits), present.len());
        assert_eq!(bench::search_pass(&table, &misses), 0);
    }
    assert_eq!(table.to_string(), snapshot);
    assert_eq!(table.chain_stats(), stats);
}

#[test]
fn test_dictionary_file_benchmark() {
    let dictionary = Dictionary::load(dictionary_path()).unwrap();
    let lexis = dictionary.lexis_array(dictionary::MAX_DICTIONARY_SIZE).unwrap();
    assert!(!lexis.is_empty());

    let table = bench::build_table(&HashTableConfig::default(), &lexis).unwrap();
    // 词典每行一个键并以换行结尾, 缓冲区大小与编码总长一致
    assert_eq!(table.encoded_key_bytes(), dictionary.byte_len());

    let config = BenchConfig {
        dictionary_path: dictionary_path(),
        search_runs: 2,
        ..BenchConfig::default()
    };
    let report = bench::run(&config).unwrap();
    assert_eq!(report.keys_per_pass, lexis.len());
    assert_eq!(report.hits_per_pass, lexis.len());
    assert_eq!(report.runs, 2);
}

#[test]
fn test_interior_terminator_keys_survive_compaction() {
    let keys = [&b"a\0b"[..], b"c", b"\0", b"a"];
    let mut table = HashTable::new(1, Crc32Strategy).unwrap();
    table.extend_forced(keys.iter().copied());
    let mut arena = KeyArena::for_table(&table).unwrap();
    let table = table.compact_into(&mut arena).unwrap();

    assert_eq!(table.len(), keys.len());
    assert_eq!(table.keys().count(), keys.len(), "键数不应因内部终止符而改变");
    for key in &keys {
        assert_eq!(table.count(key), 1, "{:?} 应恰好出现一次", key);
    }
    assert!(!table.find(b"b"));
}

#[test]
fn test_search_report_metrics() {
    let dictionary = Dictionary::from_bytes("cat\ndog\ncow\nox\n");
    let config = BenchConfig {
        search_runs: 2,
        ..BenchConfig::default()
    };
    let report = bench::run_with_dictionary(&dictionary, &config).unwrap();
    let chains = report.chains.export_prometheus();
    assert!(chains.contains("chained_hashtable_entries 4\n"));
    assert!(chains.contains("chained_hashtable_buckets 1907\n"));
    let search = report.export_prometheus();
    assert!(search.contains("chained_hashtable_search_runs 2\n"));
    assert!(search.contains("chained_hashtable_search_hits 4\n"));
}
