use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{Client, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;

use rtui_types::{ScoredMember, StoreValue, Ttl, ValueTypeTag};

use crate::error::{Error, Result};
use crate::{DEFAULT_PORT, KeyStore};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_RETRIES: usize = 2;

/// Where and how to connect to a Redis server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    pub host: String,
    pub port: u16,
    pub db: u32,
    pub password: Option<String>,
}

impl ConnectOptions {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn connection_info(&self) -> ConnectionInfo {
        ConnectionInfo {
            addr: ConnectionAddr::Tcp(self.host.clone(), self.port),
            redis: RedisConnectionInfo {
                db: i64::from(self.db),
                password: self.password.clone(),
                ..Default::default()
            },
        }
    }
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            db: 0,
            password: None,
        }
    }
}

/// [`KeyStore`] backed by a Redis server.
///
/// The connection manager multiplexes commands over one socket and
/// reconnects on the next call after the socket drops.
pub struct RedisStore {
    connection: ConnectionManager,
    name: String,
    /// Keys whose bytes are not valid UTF-8, by their lossy display form
    raw_keys: RwLock<HashMap<String, Vec<u8>>>,
}

impl RedisStore {
    /// Connect, authenticate if a password is set, and select the database.
    pub async fn connect(options: &ConnectOptions) -> Result<Self> {
        let client = Client::open(options.connection_info())?;
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(CONNECT_RETRIES)
            .set_connection_timeout(CONNECT_TIMEOUT)
            .set_response_timeout(RESPONSE_TIMEOUT);
        let connection = ConnectionManager::new_with_config(client, config).await?;

        let name = format!("redis://{}/{}", options.address(), options.db);
        log::info!("connected to {}", name);
        Ok(Self {
            connection,
            name,
            raw_keys: RwLock::new(HashMap::new()),
        })
    }

    async fn query<T: redis::FromRedisValue>(&self, cmd: &redis::Cmd) -> Result<T> {
        let mut connection = self.connection.clone();
        let reply: T = cmd.query_async(&mut connection).await?;
        Ok(reply)
    }

    /// Bytes to send for `key`: the original bytes for keys listed with a
    /// lossy name, the UTF-8 encoding otherwise.
    async fn key_bytes(&self, key: &str) -> Vec<u8> {
        key_arg(&*self.raw_keys.read().await, key)
    }
}

/// Decode a listed key. Invalid UTF-8 is replaced for display and the
/// original bytes are returned alongside.
fn decode_key(raw: Vec<u8>) -> (String, Option<Vec<u8>>) {
    match String::from_utf8(raw) {
        Ok(key) => (key, None),
        Err(err) => {
            let raw = err.into_bytes();
            (String::from_utf8_lossy(&raw).into_owned(), Some(raw))
        }
    }
}

fn key_arg(raw_keys: &HashMap<String, Vec<u8>>, key: &str) -> Vec<u8> {
    raw_keys
        .get(key)
        .cloned()
        .unwrap_or_else(|| key.as_bytes().to_vec())
}

fn decode_text(raw: Vec<u8>) -> String {
    String::from_utf8(raw).unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

/// Pair up a flat `HGETALL` reply.
fn into_pairs(flat: Vec<String>) -> Result<Vec<(String, String)>> {
    if flat.len() % 2 != 0 {
        return Err(Error::UnexpectedReply(
            "HGETALL returned an odd number of elements".to_string(),
        ));
    }
    let mut pairs = Vec::with_capacity(flat.len() / 2);
    let mut iter = flat.into_iter();
    while let (Some(field), Some(value)) = (iter.next(), iter.next()) {
        pairs.push((field, value));
    }
    Ok(pairs)
}

/// Pair up a flat `ZRANGE ... WITHSCORES` reply. A trailing member without
/// a score, or a score that is not a number, is kept with `score: None`.
fn into_scored(flat: Vec<String>) -> Vec<ScoredMember> {
    flat.chunks(2)
        .map(|chunk| ScoredMember {
            member: chunk[0].clone(),
            score: chunk.get(1).and_then(|s| s.parse::<f64>().ok()),
        })
        .collect()
}

fn texts(raw: Vec<Vec<u8>>) -> Vec<String> {
    raw.into_iter().map(decode_text).collect()
}

#[async_trait]
impl KeyStore for RedisStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_keys(&self, pattern: &str) -> Result<Vec<String>> {
        let raw: Vec<Vec<u8>> = self.query(redis::cmd("KEYS").arg(pattern)).await?;

        let mut keys = Vec::with_capacity(raw.len());
        let mut undecodable = HashMap::new();
        for bytes in raw {
            let (key, original) = decode_key(bytes);
            if let Some(original) = original {
                log::debug!("key {:?} is not valid UTF-8", original);
                undecodable.insert(key.clone(), original);
            }
            keys.push(key);
        }
        if !undecodable.is_empty() {
            self.raw_keys.write().await.extend(undecodable);
        }

        keys.sort();
        Ok(keys)
    }

    async fn get_type(&self, key: &str) -> Result<ValueTypeTag> {
        let k = self.key_bytes(key).await;
        let name: String = self.query(redis::cmd("TYPE").arg(k)).await?;
        Ok(ValueTypeTag::from_type_name(&name))
    }

    async fn get_value(&self, key: &str) -> Result<StoreValue> {
        let k = self.key_bytes(key).await;
        let value = match self.get_type(key).await? {
            ValueTypeTag::String => {
                let raw: Option<Vec<u8>> = self.query(redis::cmd("GET").arg(&k)).await?;
                raw.map_or(StoreValue::Nil, |raw| StoreValue::Text(decode_text(raw)))
            }
            ValueTypeTag::Hash => {
                let flat: Vec<Vec<u8>> = self.query(redis::cmd("HGETALL").arg(&k)).await?;
                StoreValue::Pairs(into_pairs(texts(flat))?)
            }
            ValueTypeTag::List => {
                let items: Vec<Vec<u8>> =
                    self.query(redis::cmd("LRANGE").arg(&k).arg(0).arg(-1)).await?;
                StoreValue::Items(texts(items))
            }
            ValueTypeTag::Set => {
                let members: Vec<Vec<u8>> = self.query(redis::cmd("SMEMBERS").arg(&k)).await?;
                StoreValue::Items(texts(members))
            }
            ValueTypeTag::OrderedSet => {
                let flat: Vec<Vec<u8>> = self
                    .query(redis::cmd("ZRANGE").arg(&k).arg(0).arg(-1).arg("WITHSCORES"))
                    .await?;
                StoreValue::Scored(into_scored(texts(flat)))
            }
            ValueTypeTag::None | ValueTypeTag::Unknown(_) => StoreValue::Nil,
        };
        Ok(value)
    }

    async fn get_ttl(&self, key: &str) -> Result<Ttl> {
        let k = self.key_bytes(key).await;
        let reply: i64 = self.query(redis::cmd("TTL").arg(k)).await?;
        Ok(Ttl::from_reply(reply))
    }

    async fn set_ttl(&self, key: &str, seconds: i64) -> Result<bool> {
        let k = self.key_bytes(key).await;
        let reply: i64 = self.query(redis::cmd("EXPIRE").arg(k).arg(seconds)).await?;
        Ok(reply == 1)
    }

    async fn delete_key(&self, key: &str) -> Result<bool> {
        let k = self.key_bytes(key).await;
        let reply: i64 = self.query(redis::cmd("DEL").arg(k)).await?;
        Ok(reply > 0)
    }

    async fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.query::<()>(redis::cmd("SET").arg(key).arg(value)).await
    }

    async fn add_hash(&self, key: &str, fields: &[(String, String)]) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut cmd = redis::cmd("HSET");
        cmd.arg(key);
        for (field, value) in fields {
            cmd.arg(field).arg(value);
        }
        self.query::<i64>(&cmd).await.map(|_| ())
    }

    async fn push_list(&self, key: &str, items: &[String]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        self.query::<i64>(redis::cmd("RPUSH").arg(key).arg(items))
            .await
            .map(|_| ())
    }

    async fn add_set(&self, key: &str, members: &[String]) -> Result<()> {
        if members.is_empty() {
            return Ok(());
        }
        self.query::<i64>(redis::cmd("SADD").arg(key).arg(members))
            .await
            .map(|_| ())
    }

    async fn add_scored(&self, key: &str, members: &[ScoredMember]) -> Result<()> {
        if members.is_empty() {
            return Ok(());
        }
        let mut cmd = redis::cmd("ZADD");
        cmd.arg(key);
        for member in members {
            let score = member.score.ok_or_else(|| {
                Error::UnexpectedReply(format!("member '{}' has no score", member.member))
            })?;
            cmd.arg(score).arg(&member.member);
        }
        self.query::<i64>(&cmd).await.map(|_| ())
    }
}
