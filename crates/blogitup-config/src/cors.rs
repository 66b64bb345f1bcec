use serde::Deserialize;

/// Front-end origins allowed to read responses when nothing else is configured
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["https://blogitup-fe.vercel.app", "http://localhost:3000"];

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins (wildcard "*" or explicit allow-list)
    #[serde(default = "default_origins")]
    pub origins: Origins,
    /// Value list for `Access-Control-Allow-Methods`
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,
    /// Value list for `Access-Control-Allow-Headers`
    #[serde(default = "default_headers")]
    pub headers: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: default_origins(),
            methods: default_methods(),
            headers: default_headers(),
        }
    }
}

/// Either a wildcard "*" or an explicit allow-list of origins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origins {
    /// Any origin may read responses
    Any,
    /// Only these origins may read responses
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for Origins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de;

        struct OriginsVisitor;

        impl<'de> de::Visitor<'de> for OriginsVisitor {
            type Value = Origins;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("\"*\" or array of origins")
            }

            fn visit_str<E>(self, v: &str) -> Result<Origins, E>
            where
                E: de::Error,
            {
                if v == "*" {
                    Ok(Origins::Any)
                } else {
                    Ok(Origins::List(vec![v.to_string()]))
                }
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Origins, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut values = Vec::new();
                while let Some(val) = seq.next_element::<String>()? {
                    if val == "*" {
                        return Ok(Origins::Any);
                    }
                    values.push(val);
                }
                Ok(Origins::List(values))
            }
        }

        deserializer.deserialize_any(OriginsVisitor)
    }
}

fn default_origins() -> Origins {
    Origins::List(DEFAULT_ALLOWED_ORIGINS.iter().map(ToString::to_string).collect())
}

fn default_methods() -> Vec<String> {
    ["POST", "GET", "OPTIONS"].iter().map(ToString::to_string).collect()
}

fn default_headers() -> Vec<String> {
    vec!["Content-Type".to_string()]
}
