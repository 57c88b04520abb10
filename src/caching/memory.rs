//! 테스트 전용 인메모리 저장소
//!
//! Redis 명령 의미론(음수 인덱스, TTL, NX/XX, WRONGTYPE)을 흉내 내어
//! 서버 없이 파사드의 동작을 검증합니다. `unreachable()`로 만든 저장소는
//! 모든 호출에서 연결 에러를 반환합니다.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::caching::store::KeyValueStore;
use crate::errors::{CacheError, CacheResult};

enum Data {
    Str(Vec<u8>),
    Hash(HashMap<String, Vec<u8>>),
    Set(BTreeSet<Vec<u8>>),
    List(VecDeque<Vec<u8>>),
    ZSet(Vec<(Vec<u8>, f64)>),
}

impl Data {
    fn is_empty(&self) -> bool {
        match self {
            Data::Str(_) => false,
            Data::Hash(h) => h.is_empty(),
            Data::Set(s) => s.is_empty(),
            Data::List(l) => l.is_empty(),
            Data::ZSet(z) => z.is_empty(),
        }
    }
}

struct Entry {
    data: Data,
    expires_at: Option<Instant>,
}

impl Entry {
    fn new(data: Data) -> Self {
        Self { data, expires_at: None }
    }
}

type Entries = HashMap<String, Entry>;

pub struct MemoryStore {
    entries: Mutex<Entries>,
    unreachable: bool,
}

fn wrong_type() -> CacheError {
    CacheError::Command("WRONGTYPE Operation against a key holding the wrong kind of value".to_string())
}

/// Redis의 LRANGE/LTRIM/ZRANGE 인덱스 정규화
fn normalize(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if start > stop || start >= len {
        None
    } else {
        Some((start as usize, stop as usize))
    }
}

fn drop_if_empty(entries: &mut Entries, key: &str) {
    if entries.get(key).is_some_and(|e| e.data.is_empty()) {
        entries.remove(key);
    }
}

fn sort_zset(members: &mut [(Vec<u8>, f64)]) {
    members.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            unreachable: false,
        }
    }

    /// 모든 호출이 연결 에러로 실패하는 저장소
    pub fn unreachable() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            unreachable: true,
        }
    }

    /// 코덱을 거치지 않은 원시 바이트를 저장합니다. 손상된 값 테스트용.
    pub fn insert_raw(&self, key: &str, bytes: &[u8]) {
        self.entries
            .lock()
            .expect("memory store poisoned")
            .insert(key.to_string(), Entry::new(Data::Str(bytes.to_vec())));
    }

    fn guard(&self) -> CacheResult<MutexGuard<'_, Entries>> {
        if self.unreachable {
            return Err(CacheError::Connection("Connection refused (os error 111)".to_string()));
        }
        let mut entries = self.entries.lock().expect("memory store poisoned");
        let now = Instant::now();
        entries.retain(|_, e| e.expires_at.is_none_or(|at| at > now));
        Ok(entries)
    }

    fn write_string(entries: &mut Entries, key: &str, value: Vec<u8>, ttl_seconds: Option<u64>) {
        let mut entry = Entry::new(Data::Str(value));
        entry.expires_at = ttl_seconds.map(|s| Instant::now() + Duration::from_secs(s));
        entries.insert(key.to_string(), entry);
    }

    fn read_string(entries: &Entries, key: &str) -> CacheResult<Option<Vec<u8>>> {
        match entries.get(key).map(|e| &e.data) {
            None => Ok(None),
            Some(Data::Str(bytes)) => Ok(Some(bytes.clone())),
            Some(_) => Err(wrong_type()),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn expire(&self, key: &str, seconds: i64) -> CacheResult<bool> {
        let mut entries = self.guard()?;
        if seconds <= 0 {
            return Ok(entries.remove(key).is_some());
        }
        match entries.get_mut(key) {
            Some(entry) => {
                entry.expires_at = Some(Instant::now() + Duration::from_secs(seconds as u64));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ttl(&self, key: &str) -> CacheResult<i64> {
        let entries = self.guard()?;
        Ok(match entries.get(key) {
            None => -2,
            Some(Entry { expires_at: None, .. }) => -1,
            Some(Entry { expires_at: Some(at), .. }) => {
                let remaining = at.saturating_duration_since(Instant::now());
                ((remaining.as_millis() + 500) / 1000) as i64
            }
        })
    }

    async fn exists(&self, key: &str) -> CacheResult<bool> {
        Ok(self.guard()?.contains_key(key))
    }

    async fn del(&self, keys: &[String]) -> CacheResult<u64> {
        let mut entries = self.guard()?;
        Ok(keys.iter().filter(|k| entries.remove(k.as_str()).is_some()).count() as u64)
    }

    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let entries = self.guard()?;
        Self::read_string(&entries, key)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl_seconds: Option<u64>) -> CacheResult<()> {
        let mut entries = self.guard()?;
        Self::write_string(&mut entries, key, value, ttl_seconds);
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: Vec<u8>, ttl_seconds: Option<u64>) -> CacheResult<bool> {
        let mut entries = self.guard()?;
        if entries.contains_key(key) {
            return Ok(false);
        }
        Self::write_string(&mut entries, key, value, ttl_seconds);
        Ok(true)
    }

    async fn set_xx(&self, key: &str, value: Vec<u8>, ttl_seconds: Option<u64>) -> CacheResult<bool> {
        let mut entries = self.guard()?;
        if !entries.contains_key(key) {
            return Ok(false);
        }
        Self::write_string(&mut entries, key, value, ttl_seconds);
        Ok(true)
    }

    async fn getset(&self, key: &str, value: Vec<u8>) -> CacheResult<Option<Vec<u8>>> {
        let mut entries = self.guard()?;
        let previous = Self::read_string(&entries, key)?;
        Self::write_string(&mut entries, key, value, None);
        Ok(previous)
    }

    async fn incr_by(&self, key: &str, delta: i64) -> CacheResult<i64> {
        let mut entries = self.guard()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Data::Str(b"0".to_vec())));
        let Data::Str(bytes) = &mut entry.data else {
            return Err(wrong_type());
        };
        let current: i64 = std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| CacheError::Command("ERR value is not an integer or out of range".to_string()))?;
        let next = current
            .checked_add(delta)
            .ok_or_else(|| CacheError::Command("ERR increment or decrement would overflow".to_string()))?;
        *bytes = next.to_string().into_bytes();
        Ok(next)
    }

    async fn incr_by_float(&self, key: &str, delta: f64) -> CacheResult<f64> {
        let mut entries = self.guard()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Data::Str(b"0".to_vec())));
        let Data::Str(bytes) = &mut entry.data else {
            return Err(wrong_type());
        };
        let current: f64 = std::str::from_utf8(bytes)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| CacheError::Command("ERR value is not a valid float".to_string()))?;
        let next = current + delta;
        *bytes = next.to_string().into_bytes();
        Ok(next)
    }

    async fn hget(&self, key: &str, field: &str) -> CacheResult<Option<Vec<u8>>> {
        let entries = self.guard()?;
        match entries.get(key).map(|e| &e.data) {
            None => Ok(None),
            Some(Data::Hash(hash)) => Ok(hash.get(field).cloned()),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn hgetall(&self, key: &str) -> CacheResult<HashMap<String, Vec<u8>>> {
        let entries = self.guard()?;
        match entries.get(key).map(|e| &e.data) {
            None => Ok(HashMap::new()),
            Some(Data::Hash(hash)) => Ok(hash.clone()),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn hset(&self, key: &str, field: &str, value: Vec<u8>) -> CacheResult<()> {
        self.hset_multiple(key, vec![(field.to_string(), value)]).await
    }

    async fn hset_multiple(&self, key: &str, values: Vec<(String, Vec<u8>)>) -> CacheResult<()> {
        if values.is_empty() {
            return Ok(());
        }
        let mut entries = self.guard()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Data::Hash(HashMap::new())));
        let Data::Hash(hash) = &mut entry.data else {
            return Err(wrong_type());
        };
        hash.extend(values);
        Ok(())
    }

    async fn hdel(&self, key: &str, fields: &[String]) -> CacheResult<u64> {
        let mut entries = self.guard()?;
        let removed = match entries.get_mut(key).map(|e| &mut e.data) {
            None => 0,
            Some(Data::Hash(hash)) => fields.iter().filter(|f| hash.remove(f.as_str()).is_some()).count() as u64,
            Some(_) => return Err(wrong_type()),
        };
        drop_if_empty(&mut entries, key);
        Ok(removed)
    }

    async fn hexists(&self, key: &str, field: &str) -> CacheResult<bool> {
        Ok(self.hget(key, field).await?.is_some())
    }

    async fn hincr_by_float(&self, key: &str, field: &str, delta: f64) -> CacheResult<f64> {
        let mut entries = self.guard()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Data::Hash(HashMap::new())));
        let Data::Hash(hash) = &mut entry.data else {
            return Err(wrong_type());
        };
        let current: f64 = match hash.get(field) {
            None => 0.0,
            Some(bytes) => std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| CacheError::Command("ERR hash value is not a float".to_string()))?,
        };
        let next = current + delta;
        hash.insert(field.to_string(), next.to_string().into_bytes());
        Ok(next)
    }

    async fn smembers(&self, key: &str) -> CacheResult<Vec<Vec<u8>>> {
        let entries = self.guard()?;
        match entries.get(key).map(|e| &e.data) {
            None => Ok(Vec::new()),
            Some(Data::Set(set)) => Ok(set.iter().cloned().collect()),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn sismember(&self, key: &str, member: Vec<u8>) -> CacheResult<bool> {
        let entries = self.guard()?;
        match entries.get(key).map(|e| &e.data) {
            None => Ok(false),
            Some(Data::Set(set)) => Ok(set.contains(&member)),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn sadd(&self, key: &str, members: Vec<Vec<u8>>) -> CacheResult<u64> {
        if members.is_empty() {
            return Ok(0);
        }
        let mut entries = self.guard()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Data::Set(BTreeSet::new())));
        let Data::Set(set) = &mut entry.data else {
            return Err(wrong_type());
        };
        Ok(members.into_iter().filter(|m| set.insert(m.clone())).count() as u64)
    }

    async fn scard(&self, key: &str) -> CacheResult<u64> {
        let entries = self.guard()?;
        match entries.get(key).map(|e| &e.data) {
            None => Ok(0),
            Some(Data::Set(set)) => Ok(set.len() as u64),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn srem(&self, key: &str, members: Vec<Vec<u8>>) -> CacheResult<u64> {
        let mut entries = self.guard()?;
        let removed = match entries.get_mut(key).map(|e| &mut e.data) {
            None => 0,
            Some(Data::Set(set)) => members.iter().filter(|m| set.remove(*m)).count() as u64,
            Some(_) => return Err(wrong_type()),
        };
        drop_if_empty(&mut entries, key);
        Ok(removed)
    }

    async fn smove(&self, source: &str, destination: &str, member: Vec<u8>) -> CacheResult<bool> {
        let mut entries = self.guard()?;
        if !matches!(entries.get(destination).map(|e| &e.data), None | Some(Data::Set(_))) {
            return Err(wrong_type());
        }
        let moved = match entries.get_mut(source).map(|e| &mut e.data) {
            None => false,
            Some(Data::Set(set)) => set.remove(&member),
            Some(_) => return Err(wrong_type()),
        };
        if !moved {
            return Ok(false);
        }
        drop_if_empty(&mut entries, source);
        let entry = entries
            .entry(destination.to_string())
            .or_insert_with(|| Entry::new(Data::Set(BTreeSet::new())));
        if let Data::Set(set) = &mut entry.data {
            set.insert(member);
        }
        Ok(true)
    }

    async fn lrange(&self, key: &str, start: i64, stop: i64) -> CacheResult<Vec<Vec<u8>>> {
        let entries = self.guard()?;
        match entries.get(key).map(|e| &e.data) {
            None => Ok(Vec::new()),
            Some(Data::List(list)) => Ok(match normalize(list.len(), start, stop) {
                Some((from, to)) => list.range(from..=to).cloned().collect(),
                None => Vec::new(),
            }),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn llen(&self, key: &str) -> CacheResult<u64> {
        let entries = self.guard()?;
        match entries.get(key).map(|e| &e.data) {
            None => Ok(0),
            Some(Data::List(list)) => Ok(list.len() as u64),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn lindex(&self, key: &str, index: i64) -> CacheResult<Option<Vec<u8>>> {
        let entries = self.guard()?;
        match entries.get(key).map(|e| &e.data) {
            None => Ok(None),
            Some(Data::List(list)) => {
                let position = if index < 0 { list.len() as i64 + index } else { index };
                if position < 0 {
                    return Ok(None);
                }
                Ok(list.get(position as usize).cloned())
            }
            Some(_) => Err(wrong_type()),
        }
    }

    async fn lpush(&self, key: &str, values: Vec<Vec<u8>>) -> CacheResult<u64> {
        let mut entries = self.guard()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Data::List(VecDeque::new())));
        let Data::List(list) = &mut entry.data else {
            return Err(wrong_type());
        };
        for value in values {
            list.push_front(value);
        }
        let len = list.len() as u64;
        drop_if_empty(&mut entries, key);
        Ok(len)
    }

    async fn rpush(&self, key: &str, values: Vec<Vec<u8>>) -> CacheResult<u64> {
        let mut entries = self.guard()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Data::List(VecDeque::new())));
        let Data::List(list) = &mut entry.data else {
            return Err(wrong_type());
        };
        list.extend(values);
        let len = list.len() as u64;
        drop_if_empty(&mut entries, key);
        Ok(len)
    }

    async fn lset(&self, key: &str, index: i64, value: Vec<u8>) -> CacheResult<()> {
        let mut entries = self.guard()?;
        match entries.get_mut(key).map(|e| &mut e.data) {
            None => Err(CacheError::Command("ERR no such key".to_string())),
            Some(Data::List(list)) => {
                let position = if index < 0 { list.len() as i64 + index } else { index };
                match usize::try_from(position).ok().filter(|p| *p < list.len()) {
                    Some(p) => {
                        list[p] = value;
                        Ok(())
                    }
                    None => Err(CacheError::Command("ERR index out of range".to_string())),
                }
            }
            Some(_) => Err(wrong_type()),
        }
    }

    async fn lrem(&self, key: &str, count: i64, value: Vec<u8>) -> CacheResult<u64> {
        let mut entries = self.guard()?;
        let removed = match entries.get_mut(key).map(|e| &mut e.data) {
            None => 0,
            Some(Data::List(list)) => {
                let limit = if count == 0 { usize::MAX } else { count.unsigned_abs() as usize };
                let mut removed = 0usize;
                let mut kept = VecDeque::with_capacity(list.len());
                if count >= 0 {
                    for item in list.drain(..) {
                        if removed < limit && item == value {
                            removed += 1;
                        } else {
                            kept.push_back(item);
                        }
                    }
                } else {
                    for item in list.drain(..).rev() {
                        if removed < limit && item == value {
                            removed += 1;
                        } else {
                            kept.push_front(item);
                        }
                    }
                }
                *list = kept;
                removed as u64
            }
            Some(_) => return Err(wrong_type()),
        };
        drop_if_empty(&mut entries, key);
        Ok(removed)
    }

    async fn ltrim(&self, key: &str, start: i64, stop: i64) -> CacheResult<()> {
        let mut entries = self.guard()?;
        match entries.get_mut(key).map(|e| &mut e.data) {
            None => {}
            Some(Data::List(list)) => {
                let kept: VecDeque<Vec<u8>> = match normalize(list.len(), start, stop) {
                    Some((from, to)) => list.drain(from..=to).collect(),
                    None => VecDeque::new(),
                };
                *list = kept;
            }
            Some(_) => return Err(wrong_type()),
        }
        drop_if_empty(&mut entries, key);
        Ok(())
    }

    async fn zadd(&self, key: &str, members: Vec<(Vec<u8>, f64)>) -> CacheResult<u64> {
        if members.is_empty() {
            return Ok(0);
        }
        let mut entries = self.guard()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(Data::ZSet(Vec::new())));
        let Data::ZSet(zset) = &mut entry.data else {
            return Err(wrong_type());
        };
        let mut added = 0;
        for (member, score) in members {
            match zset.iter_mut().find(|(m, _)| *m == member) {
                Some(existing) => existing.1 = score,
                None => {
                    zset.push((member, score));
                    added += 1;
                }
            }
        }
        sort_zset(zset);
        Ok(added)
    }

    async fn zrange(&self, key: &str, start: i64, stop: i64) -> CacheResult<Vec<Vec<u8>>> {
        let entries = self.guard()?;
        match entries.get(key).map(|e| &e.data) {
            None => Ok(Vec::new()),
            Some(Data::ZSet(zset)) => Ok(match normalize(zset.len(), start, stop) {
                Some((from, to)) => zset[from..=to].iter().map(|(m, _)| m.clone()).collect(),
                None => Vec::new(),
            }),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn zrem(&self, key: &str, members: Vec<Vec<u8>>) -> CacheResult<u64> {
        let mut entries = self.guard()?;
        let removed = match entries.get_mut(key).map(|e| &mut e.data) {
            None => 0,
            Some(Data::ZSet(zset)) => {
                let before = zset.len();
                zset.retain(|(m, _)| !members.contains(m));
                (before - zset.len()) as u64
            }
            Some(_) => return Err(wrong_type()),
        };
        drop_if_empty(&mut entries, key);
        Ok(removed)
    }

    async fn ping(&self) -> CacheResult<()> {
        self.guard().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_follows_redis_index_rules() {
        assert_eq!(normalize(3, 0, -1), Some((0, 2)));
        assert_eq!(normalize(3, 1, -1), Some((1, 2)));
        assert_eq!(normalize(3, -2, 10), Some((1, 2)));
        assert_eq!(normalize(3, 2, 1), None);
        assert_eq!(normalize(3, 5, 9), None);
        assert_eq!(normalize(0, 0, -1), None);
    }

    #[tokio::test]
    async fn test_lpush_prepends_in_argument_order() {
        let store = MemoryStore::new();
        store.lpush("l", vec![b"a".to_vec(), b"b".to_vec()]).await.unwrap();

        assert_eq!(store.lrange("l", 0, -1).await.unwrap(), vec![b"b".to_vec(), b"a".to_vec()]);
    }

    #[tokio::test]
    async fn test_wrong_type_is_a_command_error() {
        let store = MemoryStore::new();
        store.set("s", b"1".to_vec(), None).await.unwrap();

        assert!(matches!(store.llen("s").await, Err(CacheError::Command(_))));
    }
}
