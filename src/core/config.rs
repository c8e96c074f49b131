use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub data: DataConfig,
    pub supabase: SupabaseConfig,
    pub database: Option<DatabaseConfig>,
    pub storage: StorageConfig,
    pub minio: Option<MinIOConfig>,
    pub site: SiteConfig,
    pub admin: AdminConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_size: usize,
}

/// Which adapter backs the category/item repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBackend {
    /// Hosted PostgREST endpoint (default)
    Supabase,
    /// Direct Postgres connection via sqlx
    Postgres,
}

/// Which adapter backs image storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Supabase,
    S3,
}

#[derive(Debug, Clone)]
pub struct DataConfig {
    pub backend: DataBackend,
}

/// Hosted backend handle settings
///
/// Both values may be empty. The client still constructs and every request
/// then fails with a backend-reported error.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    /// Load the starter menu into an empty catalog after migrations
    pub seed_menu: bool,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Bucket holding menu images
    pub bucket: String,
    /// Key prefix inside the bucket (e.g., "menu-images")
    pub prefix: String,
}

/// MinIO/S3 storage configuration, used when `STORAGE_BACKEND=s3`
#[derive(Debug, Clone)]
pub struct MinIOConfig {
    /// MinIO/S3 endpoint URL
    pub endpoint: String,
    /// Public endpoint URL for publicly accessible files (optional, defaults to endpoint)
    pub public_endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    /// AWS region (for S3 compatibility)
    pub region: String,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub title: String,
    pub tagline: String,
    /// Literal appended after every displayed price
    pub currency_suffix: String,
    /// Image shown for items without an image path
    pub placeholder_image: String,
    pub static_dir: String,
    /// `dir` attribute of rendered pages, `rtl` or `ltr`
    pub text_direction: String,
}

#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        let data = DataConfig::from_env()?;
        let storage = StorageConfig::from_env()?;

        let database = match data.backend {
            DataBackend::Postgres => Some(DatabaseConfig::from_env()?),
            DataBackend::Supabase => None,
        };

        let minio = match storage.backend {
            StorageBackend::S3 => Some(MinIOConfig::from_env()?),
            StorageBackend::Supabase => None,
        };

        Ok(Config {
            app: AppConfig::from_env()?,
            data,
            supabase: SupabaseConfig::from_env(),
            database,
            storage,
            minio,
            site: SiteConfig::from_env(),
            admin: AdminConfig::from_env(),
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size = env::var("MAX_UPLOAD_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_UPLOAD_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_UPLOAD_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_upload_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DataConfig {
    pub fn from_env() -> Result<Self, String> {
        let backend = match env::var("DATA_BACKEND")
            .unwrap_or_else(|_| "supabase".to_string())
            .to_lowercase()
            .as_str()
        {
            "supabase" => DataBackend::Supabase,
            "postgres" => DataBackend::Postgres,
            other => {
                return Err(format!(
                    "DATA_BACKEND must be 'supabase' or 'postgres', got '{}'",
                    other
                ))
            }
        };

        Ok(Self { backend })
    }
}

impl SupabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("SUPABASE_URL").unwrap_or_default(),
            anon_key: env::var("SUPABASE_ANON_KEY").unwrap_or_default(),
        }
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set when DATA_BACKEND=postgres".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        let seed_menu = Self::parse_flag(env::var("DB_SEED_MENU").ok().as_deref());

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
            seed_menu,
        })
    }

    fn parse_flag(value: Option<&str>) -> bool {
        matches!(
            value.map(|v| v.trim().to_lowercase()).as_deref(),
            Some("1" | "true" | "yes")
        )
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, String> {
        let backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "supabase".to_string())
            .to_lowercase()
            .as_str()
        {
            "supabase" => StorageBackend::Supabase,
            "s3" | "minio" => StorageBackend::S3,
            other => {
                return Err(format!(
                    "STORAGE_BACKEND must be 'supabase' or 's3', got '{}'",
                    other
                ))
            }
        };

        let bucket = env::var("STORAGE_BUCKET").unwrap_or_else(|_| "items".to_string());
        let prefix = env::var("STORAGE_PREFIX")
            .unwrap_or_else(|_| "menu-images".to_string())
            .trim_matches('/')
            .to_string();

        if prefix.is_empty() || prefix.contains('/') {
            return Err("STORAGE_PREFIX must be a single non-empty path segment".to_string());
        }

        Ok(Self {
            backend,
            bucket,
            prefix,
        })
    }
}

impl MinIOConfig {
    pub fn from_env() -> Result<Self, String> {
        let endpoint =
            env::var("MINIO_ENDPOINT").unwrap_or_else(|_| "http://localhost:9000".to_string());

        // Public endpoint defaults to the main endpoint if not specified
        let public_endpoint =
            env::var("MINIO_PUBLIC_ENDPOINT").unwrap_or_else(|_| endpoint.clone());

        let access_key = env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());
        let secret_key = env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());
        let region = env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".to_string());

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            public_endpoint: public_endpoint.trim_end_matches('/').to_string(),
            access_key,
            secret_key,
            region,
        })
    }
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self {
            title: env::var("SITE_TITLE").unwrap_or_else(|_| "Eli's Coffee Shop".to_string()),
            tagline: env::var("SITE_TAGLINE")
                .unwrap_or_else(|_| "Where every sip tells a story".to_string()),
            currency_suffix: env::var("CURRENCY_SUFFIX").unwrap_or_else(|_| "T".to_string()),
            placeholder_image: env::var("PLACEHOLDER_IMAGE")
                .unwrap_or_else(|_| "/logo.png".to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
            text_direction: Self::parse_text_direction(
                env::var("SITE_TEXT_DIRECTION").ok().as_deref(),
            ),
        }
    }

    /// Anything but an explicit `ltr` renders right-to-left
    fn parse_text_direction(value: Option<&str>) -> String {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "ltr" => "ltr".to_string(),
            _ => "rtl".to_string(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Eli's Coffee Shop".to_string(),
            tagline: "Where every sip tells a story".to_string(),
            currency_suffix: "T".to_string(),
            placeholder_image: "/logo.png".to_string(),
            static_dir: "public".to_string(),
            text_direction: "rtl".to_string(),
        }
    }
}

impl AdminConfig {
    pub fn from_env() -> Self {
        Self {
            username: env::var("ADMIN_USERNAME").ok().filter(|s| !s.is_empty()),
            password: env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
        }
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Cafe Menu API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Menu and admin API for the cafe site".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
