use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Clone)]
pub struct Cache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Mutex<HashMap<K, V>>>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the cached value for `key`, or runs `fetch` and stores its
    /// result. The lock is held across the fetch so concurrent callers cannot
    /// trigger duplicate fetches for the same key. Errors are not cached.
    pub async fn get_or_try_insert_with<E, F, Fut>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let mut cache = self.inner.lock().await;
        if let Some(value) = cache.get(&key) {
            debug!("Cache HIT");
            return Ok(value.clone());
        }
        debug!("Cache MISS");
        let value = fetch().await?;
        cache.insert(key, value.clone());
        Ok(value)
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}
