use crate::utils::error::{DemoError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// 各例程的輸入，預設值即為觸發錯誤的條件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub files: FilesConfig,
    pub database: DatabaseConfig,
    pub symbols: SymbolsConfig,
    pub arithmetic: ArithmeticConfig,
    pub sequence: SequenceConfig,
    pub priority: PriorityConfig,
    pub parse: ParseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub write_target: PathBuf,
    pub missing_file: PathBuf,
    pub data_file: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            // 上層目錄不存在，寫入必定失敗
            write_target: PathBuf::from("readonly/readonlyfile.txt"),
            missing_file: PathBuf::from("nonexistentfile.txt"),
            data_file: PathBuf::from("datafile.txt"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub query: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            query: "INVALID SQL".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolsConfig {
    pub name: String,
}

impl Default for SymbolsConfig {
    fn default() -> Self {
        Self {
            name: "com.example.NonExistentClass".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArithmeticConfig {
    pub numerator: i32,
    pub divisor: i32,
}

impl Default for ArithmeticConfig {
    fn default() -> Self {
        Self {
            numerator: 50,
            divisor: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    pub values: Vec<i32>,
    pub index: usize,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            values: vec![10, 20, 30],
            index: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityConfig {
    pub value: i32,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self { value: 11 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    pub input: String,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            input: "InvalidNumber".to_string(),
        }
    }
}

impl DemoConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DemoError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DemoError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未定義的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DemoError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn database_url(&self) -> Result<Url> {
        validate_url("database.url", &self.database.url)
    }
}

fn validate_path_buf(field_name: &str, path: &Path) -> Result<()> {
    validate_path(field_name, &path.to_string_lossy())
}

impl Validate for DemoConfig {
    fn validate(&self) -> Result<()> {
        validate_path_buf("files.write_target", &self.files.write_target)?;
        validate_path_buf("files.missing_file", &self.files.missing_file)?;
        validate_path_buf("files.data_file", &self.files.data_file)?;
        validate_non_empty_string("database.query", &self.database.query)?;
        validate_non_empty_string("symbols.name", &self.symbols.name)?;
        Ok(())
    }
}
