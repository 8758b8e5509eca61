use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use zeroize::Zeroizing;

use secp_keychain::signing::NO_ERROR;
use secp_keychain::types::{decode_hex, decode_hex_array, Digest, KeyPairHex};
use secp_keychain::utils::config::{self, Settings};
use secp_keychain::{
    deterministic_key_pair_from_seed, generate_deterministic_key_pair, generate_key_pair,
    log_info, public_key_from_secret_key, recover_public_key, secp256k1_hash, shared_secret, sign,
    sign_deterministic, uncompress_public_key, uncompressed_public_key_from_secret_key,
    validate_public_key, validate_secret_key, verify_signature_detailed, KeyChain, KeychainError,
    SEED_LEN,
};

const MODULE: &str = "cli";

#[derive(Parser, Debug)]
#[command(name = "secp-keychain", version, about = "secp256k1 key generation, signing and ECDH")]
struct Args {
    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Generate random key pairs
    Generate {
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },

    /// Derive a key pair from a seed
    FromSeed {
        seed: String,

        /// Treat SEED as hex instead of UTF-8 text
        #[arg(long)]
        hex: bool,

        /// Re-hash a 32-byte seed directly instead of taking a chain step
        #[arg(long)]
        raw: bool,
    },

    /// Walk the deterministic key chain rooted at a seed
    Chain {
        seed: String,

        #[arg(long)]
        hex: bool,

        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },

    /// Public key for a hex secret key
    Pubkey {
        secret_key: String,

        #[arg(long)]
        uncompressed: bool,
    },

    /// Expand a compressed public key
    Uncompress { public_key: String },

    /// Report whether a public key is valid
    Validate { public_key: String },

    /// Sign a 32-byte hex digest
    Sign {
        digest: String,
        secret_key: String,

        /// Derive the nonce from this text for a reproducible signature
        #[arg(long, value_name = "TEXT")]
        nonce_seed: Option<String>,
    },

    /// Verify a signature against a public key
    Verify {
        digest: String,
        signature: String,
        public_key: String,
    },

    /// Recover the signing public key
    Recover { digest: String, signature: String },

    /// Shared point between a public key and a secret key
    Ecdh { public_key: String, secret_key: String },

    /// ECDH-salted SHA-256 of an input
    SaltedHash {
        input: String,

        #[arg(long)]
        hex: bool,
    },
}

#[derive(Serialize)]
struct ChainEntry<'a> {
    index: usize,
    #[serde(flatten)]
    keys: &'a KeyPairHex,
}

#[derive(Serialize)]
struct ChainOutput<'a> {
    keys: Vec<ChainEntry<'a>>,
    next_seed_hex: String,
}

#[derive(Serialize)]
struct VerifyOutput {
    valid: bool,
    reason: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    config::init(Settings::from_env().with_debug(args.verbose));

    match args.cmd {
        Cmd::Generate { count } => {
            check_count(count)?;
            let pairs: Vec<KeyPairHex> = (0..count).map(|_| generate_key_pair().to_hex()).collect();
            log_info!(MODULE, "generated random key pairs", count = count);
            print_key_pairs(&pairs, args.json)?;
        }
        Cmd::FromSeed { seed, hex: is_hex, raw } => {
            let seed = seed_bytes(&seed, is_hex)?;
            let pair = if raw {
                if seed.len() != SEED_LEN {
                    return Err(KeychainError::invalid_input(format!(
                        "raw seed must be {} bytes, got {}",
                        SEED_LEN,
                        seed.len()
                    ))
                    .into());
                }
                deterministic_key_pair_from_seed(&seed)
            } else {
                generate_deterministic_key_pair(&seed)
            };
            print_key_pairs(&[pair.to_hex()], args.json)?;
        }
        Cmd::Chain { seed, hex: is_hex, count } => {
            check_count(count)?;
            let seed = seed_bytes(&seed, is_hex)?;
            let mut chain = KeyChain::new(&seed);
            let pairs: Vec<KeyPairHex> = chain.by_ref().take(count).map(|p| p.to_hex()).collect();
            let output = ChainOutput {
                keys: pairs
                    .iter()
                    .enumerate()
                    .map(|(index, keys)| ChainEntry { index, keys })
                    .collect(),
                next_seed_hex: hex::encode(chain.chain_seed()),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                for entry in &output.keys {
                    println!("[{}] public key: {}", entry.index, entry.keys.public_key_hex);
                    println!("[{}] secret key: {}", entry.index, entry.keys.secret_key_hex);
                }
                println!("next seed: {}", output.next_seed_hex);
            }
        }
        Cmd::Pubkey { secret_key, uncompressed } => {
            let secret_key = secret_key_bytes(&secret_key)?;
            let public_key = if uncompressed {
                hex::encode(uncompressed_public_key_from_secret_key(&secret_key[..]))
            } else {
                hex::encode(public_key_from_secret_key(&secret_key[..]))
            };
            print_value("public_key_hex", &public_key, args.json)?;
        }
        Cmd::Uncompress { public_key } => {
            let public_key = decode_hex(&public_key)?;
            let validity = validate_public_key(&public_key);
            if !validity.is_valid() {
                return Err(KeychainError::invalid_public_key(validity.to_string()).into());
            }
            let uncompressed = hex::encode(uncompress_public_key(&public_key));
            print_value("uncompressed_public_key_hex", &uncompressed, args.json)?;
        }
        Cmd::Validate { public_key } => {
            let public_key = decode_hex(&public_key)?;
            let validity = validate_public_key(&public_key);
            if args.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "valid": validity.is_valid(),
                        "code": validity.code(),
                        "status": validity,
                    })
                );
            } else {
                println!("{} (code {})", validity, validity.code());
            }
            if !validity.is_valid() {
                std::process::exit(1);
            }
        }
        Cmd::Sign { digest, secret_key, nonce_seed } => {
            let digest: Digest = decode_hex_array(&digest).context("digest")?;
            let secret_key = secret_key_bytes(&secret_key)?;
            let signature = match nonce_seed {
                Some(nonce_seed) => {
                    sign_deterministic(&digest, &secret_key[..], nonce_seed.as_bytes())
                }
                None => sign(&digest, &secret_key[..]),
            };
            print_value("signature_hex", &hex::encode(signature), args.json)?;
        }
        Cmd::Verify { digest, signature, public_key } => {
            let digest: Digest = decode_hex_array(&digest).context("digest")?;
            let signature = decode_hex(&signature).context("signature")?;
            let public_key = decode_hex(&public_key).context("public key")?;

            let outcome = verify_signature_detailed(&digest, &signature, &public_key);
            let reason = match &outcome {
                Ok(()) => NO_ERROR.to_string(),
                Err(e) => e.to_string(),
            };

            if args.json {
                let output = VerifyOutput {
                    valid: outcome.is_ok(),
                    reason,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", reason);
            }
            if outcome.is_err() {
                std::process::exit(1);
            }
        }
        Cmd::Recover { digest, signature } => {
            let digest: Digest = decode_hex_array(&digest).context("digest")?;
            let signature = decode_hex(&signature).context("signature")?;
            let public_key = recover_public_key(&digest, &signature).map_err(KeychainError::from)?;
            print_value("public_key_hex", &hex::encode(public_key), args.json)?;
        }
        Cmd::Ecdh { public_key, secret_key } => {
            let public_key = decode_hex(&public_key).context("public key")?;
            let secret_key = secret_key_bytes(&secret_key)?;
            let shared = shared_secret(&public_key, &secret_key[..]).map_err(KeychainError::from)?;
            print_value("shared_point_hex", &hex::encode(shared), args.json)?;
        }
        Cmd::SaltedHash { input, hex: is_hex } => {
            let input = seed_bytes(&input, is_hex)?;
            print_value("hash_hex", &hex::encode(secp256k1_hash(&input)), args.json)?;
        }
    }

    Ok(())
}

fn check_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(KeychainError::invalid_input("count must be >= 1").into());
    }
    Ok(())
}

/// Seed bytes from text or hex
fn seed_bytes(seed: &str, is_hex: bool) -> Result<Zeroizing<Vec<u8>>> {
    let bytes = if is_hex {
        decode_hex(seed).context("seed")?
    } else {
        seed.as_bytes().to_vec()
    };
    Ok(Zeroizing::new(bytes))
}

/// Decode and validate a secret key before it reaches the library,
/// which treats an invalid scalar as fatal
fn secret_key_bytes(input: &str) -> Result<Zeroizing<[u8; 32]>> {
    let secret_key = Zeroizing::new(decode_hex_array::<32>(input).context("secret key")?);
    if !validate_secret_key(&secret_key[..]) {
        return Err(KeychainError::invalid_secret_key("secret key is not a valid scalar").into());
    }
    Ok(secret_key)
}

fn print_key_pairs(pairs: &[KeyPairHex], json: bool) -> Result<()> {
    if json {
        if let [single] = pairs {
            println!("{}", serde_json::to_string_pretty(single)?);
        } else {
            println!("{}", serde_json::to_string_pretty(pairs)?);
        }
    } else {
        for pair in pairs {
            println!("public key: {}", pair.public_key_hex);
            println!("secret key: {}", pair.secret_key_hex);
        }
    }
    Ok(())
}

fn print_value(key: &str, value: &str, json: bool) -> Result<()> {
    if json {
        let mut map = serde_json::Map::new();
        map.insert(key.to_string(), serde_json::Value::String(value.to_string()));
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}
