use crate::bizkit::generate_order_sn;
use crate::config::KitConfig;
use crate::cryptokit::{
    base64_decode, base64_encode, crc32, dynamic_decrypt, dynamic_encrypt,
    dynamic_encrypt_with_expiry, md5, md5_file, sha1, sha1_file,
};
use crate::filekit::zip_directory;
use crate::mathkit::number_format;
use crate::syskit::version_compare;
use crate::urlkit::{parse_url, UrlComponent};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cvkit")]
#[command(about = "Hashing, encoding, token and file helpers from the command line")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines at the configured level
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// MD5 hex digest of a string or file
    Md5 {
        input: String,
        /// Treat the input as a file path
        #[arg(long)]
        file: bool,
    },
    /// SHA-1 hex digest of a string or file
    Sha1 {
        input: String,
        #[arg(long)]
        file: bool,
    },
    /// CRC-32 checksum of a string
    Crc32 { input: String },
    Base64Encode { input: String },
    Base64Decode { input: String },
    /// Create a reversible token
    Encrypt {
        #[arg(long)]
        secret: String,
        plain: String,
        /// Seconds until the token expires
        #[arg(long)]
        expiry: Option<u64>,
    },
    /// Read back a token made by `encrypt`
    Decrypt {
        #[arg(long)]
        secret: String,
        token: String,
    },
    /// Compare two versions, printing true or false
    VersionCompare {
        version1: String,
        version2: String,
        #[arg(default_value = "<")]
        operator: String,
    },
    /// Print the components of a URL as JSON
    ParseUrl { url: String },
    /// Zip a directory
    ZipDir { dir: PathBuf, output: PathBuf },
    NumberFormat {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        #[arg(long, default_value = "2")]
        decimals: usize,
        #[arg(long, default_value = ".")]
        dec_point: String,
        #[arg(long, default_value = ",")]
        thousands_sep: String,
    },
    /// Generate an order number
    OrderSn {
        #[arg(long)]
        prefix: Option<String>,
    },
}

impl Cli {
    /// The file named by `--config`, or the defaults. The result is validated.
    pub fn load_config(&self) -> Result<KitConfig> {
        let config = match &self.config {
            Some(path) => KitConfig::from_file(path)?,
            None => KitConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

impl Command {
    /// Run the command and return what it prints.
    pub fn execute(&self) -> Result<String> {
        let output = match self {
            Command::Md5 { input, file } if *file => md5_file(input)?,
            Command::Md5 { input, .. } => md5(input),
            Command::Sha1 { input, file } if *file => sha1_file(input)?,
            Command::Sha1 { input, .. } => sha1(input),
            Command::Crc32 { input } => crc32(input).to_string(),
            Command::Base64Encode { input } => base64_encode(input),
            Command::Base64Decode { input } => base64_decode(input)?,
            Command::Encrypt {
                secret,
                plain,
                expiry: Some(seconds),
            } => dynamic_encrypt_with_expiry(secret, plain, *seconds),
            Command::Encrypt { secret, plain, .. } => dynamic_encrypt(secret, plain),
            Command::Decrypt { secret, token } => dynamic_decrypt(secret, token)?,
            Command::VersionCompare {
                version1,
                version2,
                operator,
            } => version_compare(version1, version2, operator)?.to_string(),
            Command::ParseUrl { url } => {
                let parts: BTreeMap<_, _> = parse_url(url, UrlComponent::all())?.into_iter().collect();
                serde_json::to_string_pretty(&parts)?
            }
            Command::ZipDir { dir, output } => {
                validate_path("dir", &dir.to_string_lossy())?;
                validate_path("output", &output.to_string_lossy())?;
                zip_directory(dir, output)?;
                output.display().to_string()
            }
            Command::NumberFormat {
                value,
                decimals,
                dec_point,
                thousands_sep,
            } => number_format(*value, *decimals, dec_point, thousands_sep),
            Command::OrderSn { prefix } => generate_order_sn(prefix.as_deref()),
        };
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::KitError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::parse_from(["cvkit", "-v", "md5", "hello"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Md5 { ref input, file: false } if input == "hello"));

        let cli = Cli::parse_from(["cvkit", "number-format", "-1234.567", "--decimals", "1"]);
        assert!(matches!(cli.command, Command::NumberFormat { decimals: 1, .. }));

        let cli = Cli::parse_from(["cvkit", "version-compare", "1.0", "1.1", "--config", "kit.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("kit.toml")));
    }

    #[test]
    fn test_execute_hashes() {
        let out = Command::Md5 {
            input: "hello".to_string(),
            file: false,
        }
        .execute()
        .unwrap();
        assert_eq!(out, "5d41402abc4b2a76b9719d911017c592");

        let out = Command::Sha1 {
            input: "abc".to_string(),
            file: false,
        }
        .execute()
        .unwrap();
        assert_eq!(out, "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn test_execute_token_round_trip() {
        let token = Command::Encrypt {
            secret: "cli-secret".to_string(),
            plain: "order:77".to_string(),
            expiry: None,
        }
        .execute()
        .unwrap();
        let plain = Command::Decrypt {
            secret: "cli-secret".to_string(),
            token,
        }
        .execute()
        .unwrap();
        assert_eq!(plain, "order:77");
    }

    #[test]
    fn test_execute_misc() {
        let out = Command::VersionCompare {
            version1: "1.2".to_string(),
            version2: "1.10".to_string(),
            operator: "<".to_string(),
        }
        .execute()
        .unwrap();
        assert_eq!(out, "true");

        let out = Command::NumberFormat {
            value: 1234567.891,
            decimals: 2,
            dec_point: ".".to_string(),
            thousands_sep: ",".to_string(),
        }
        .execute()
        .unwrap();
        assert_eq!(out, "1,234,567.89");

        let out = Command::ParseUrl {
            url: "https://example.com:8080/p?q=1".to_string(),
        }
        .execute()
        .unwrap();
        let parts: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parts["port"], "8080");

        assert!(Command::Base64Decode {
            input: "***".to_string()
        }
        .execute()
        .is_err());
    }

    #[test]
    fn test_load_config() {
        let cli = Cli::parse_from(["cvkit", "order-sn"]);
        assert_eq!(cli.load_config().unwrap().http.timeout_seconds, 6);

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[http]\ntimeout_seconds = 0\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let cli = Cli::parse_from(["cvkit", "--config", path.as_str(), "order-sn"]);
        assert!(matches!(
            cli.load_config(),
            Err(KitError::InvalidConfigValueError { .. })
        ));
    }
}
