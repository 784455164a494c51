//! Demo data set used by `--samples` and `rtui seed`.

use serde_json::json;

use rtui_types::{StoreValue, ValueTypeTag};

use crate::KeyStore;
use crate::error::Result;

/// One key to seed, with an optional expiry in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub key: String,
    pub tag: ValueTypeTag,
    pub value: StoreValue,
    pub ttl: Option<i64>,
}

impl Sample {
    fn new(key: &str, value: StoreValue) -> Self {
        let tag = match &value {
            StoreValue::Pairs(_) => ValueTypeTag::Hash,
            StoreValue::Items(_) => ValueTypeTag::List,
            StoreValue::Scored(_) => ValueTypeTag::OrderedSet,
            StoreValue::Text(_) | StoreValue::Nil => ValueTypeTag::String,
        };
        Self {
            key: key.to_string(),
            tag,
            value,
            ttl: None,
        }
    }

    fn as_set(mut self) -> Self {
        self.tag = ValueTypeTag::Set;
        self
    }

    fn expiring(mut self, seconds: i64) -> Self {
        self.ttl = Some(seconds);
        self
    }
}

fn list(items: &[&str]) -> String {
    json!(items).to_string()
}

pub fn sample_data() -> Vec<Sample> {
    vec![
        Sample::new("config:api:endpoint", StoreValue::text("https://api.example.com/v1")),
        Sample::new("config:api:timeout", StoreValue::text("30")),
        Sample::new(
            "user:1000",
            StoreValue::pairs([
                ("name", "John Doe"),
                ("email", "john@example.com"),
                ("age", "30"),
            ]),
        ),
        Sample::new(
            "user:1001",
            StoreValue::pairs([("name", "Jane Smith"), ("email", "jane@example.com")]),
        ),
        Sample::new(
            "cart:user:1000:items",
            StoreValue::items(["product:1", "product:2", "product:3"]),
        ),
        Sample::new(
            "categories:electronics",
            StoreValue::items(["phones", "laptops", "tablets"]),
        )
        .as_set(),
        Sample::new(
            "ratings:product:1",
            StoreValue::scored([("user:1000", 4.5), ("user:1001", 5.0)]),
        ),
        Sample::new(
            "cache:user:1000:preferences",
            StoreValue::text(
                json!({"theme": "dark", "language": "en", "notifications": true}).to_string(),
            ),
        )
        .expiring(3600),
        Sample::new(
            "got:houses:stark",
            StoreValue::pairs([
                ("name", "House Stark"),
                ("words", "Winter is Coming"),
                ("seat", "Winterfell"),
                ("region", "The North"),
            ]),
        ),
        Sample::new(
            "got:houses:stark:members",
            StoreValue::items([
                "Eddard Stark",
                "Catelyn Stark",
                "Robb Stark",
                "Sansa Stark",
                "Arya Stark",
                "Bran Stark",
                "Rickon Stark",
                "Jon Snow",
            ]),
        ),
        Sample::new(
            "got:characters:arya_stark",
            StoreValue::pairs([
                ("name", "Arya Stark".to_string()),
                ("title", "Princess of Winterfell".to_string()),
                ("status", "Alive".to_string()),
                ("house", "Stark".to_string()),
                ("aliases", list(&["A Girl", "No One"])),
            ]),
        ),
        Sample::new(
            "got:house:lannister",
            StoreValue::text(
                json!({"name": "House Lannister", "words": "Hear Me Roar!", "seat": "Casterly Rock"})
                    .to_string(),
            ),
        ),
        Sample::new(
            "music:artists:green_day",
            StoreValue::pairs([
                ("name", "Green Day".to_string()),
                ("genre", "Punk Rock".to_string()),
                ("formed", "1987".to_string()),
                ("origin", "Berkeley, California".to_string()),
                (
                    "members",
                    list(&["Billie Joe Armstrong", "Mike Dirnt", "Tré Cool"]),
                ),
            ]),
        ),
        Sample::new(
            "music:albums:green_day:american_idiot",
            StoreValue::pairs([
                ("title", "American Idiot".to_string()),
                ("artist", "Green Day".to_string()),
                ("year", "2004".to_string()),
                (
                    "tracks",
                    list(&[
                        "American Idiot",
                        "Jesus of Suburbia",
                        "Holiday",
                        "Boulevard of Broken Dreams",
                    ]),
                ),
            ]),
        ),
        Sample::new(
            "music:artist:radiohead:album:ok_computer",
            StoreValue::text(
                json!({
                    "title": "OK Computer",
                    "year": 1997,
                    "rating": 9.5,
                    "tracks": ["Airbag", "Paranoid Android", "Exit Music (For a Film)"],
                    "credits": {"producer": "Nigel Godrich", "label": "Parlophone"}
                })
                .to_string(),
            ),
        ),
        Sample::new(
            "music:charts:weekly",
            StoreValue::scored([
                ("Boulevard of Broken Dreams", 3.0),
                ("Happier Than Ever", 1.0),
                ("Paranoid Android", 2.0),
            ]),
        ),
        Sample::new(
            "code:key_tree",
            StoreValue::text(
                json!({
                    "metadata": {
                        "name": "KeyTree",
                        "type": "struct",
                        "description": "Tree widget listing keys by namespace"
                    },
                    "code": "pub struct KeyTree {\n    roots: Vec<Node>,\n    cursor: usize,\n}\n"
                })
                .to_string(),
            ),
        ),
        Sample::new(
            "code:value_view",
            StoreValue::pairs([
                ("name", "ValueView"),
                ("kind", "widget"),
                (
                    "code",
                    "fn render(value: &Value) -> Vec<String> {\n    value.lines().collect()\n}",
                ),
            ]),
        ),
    ]
}

/// Write every sample into `store`. Returns the number of keys written.
pub async fn load_sample_data(store: &dyn KeyStore) -> Result<usize> {
    let samples = sample_data();

    for sample in &samples {
        let key = sample.key.as_str();
        match (&sample.tag, &sample.value) {
            (ValueTypeTag::Set, StoreValue::Items(members)) => store.add_set(key, members).await?,
            (_, StoreValue::Items(items)) => store.push_list(key, items).await?,
            (_, StoreValue::Text(text)) => store.set_string(key, text).await?,
            (_, StoreValue::Pairs(pairs)) => store.add_hash(key, pairs).await?,
            (_, StoreValue::Scored(members)) => store.add_scored(key, members).await?,
            (_, StoreValue::Nil) => continue,
        }
        if let Some(seconds) = sample.ttl {
            store.set_ttl(key, seconds).await?;
        }
        log::debug!("seeded {}", key);
    }

    log::info!("loaded {} sample keys into {}", samples.len(), store.name());
    Ok(samples.len())
}
