use super::search::strtr;
use rand::seq::SliceRandom;
use rand::Rng;

const NONCE_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn swap_if_present(chars: &mut [char], a: usize, b: usize) {
    if a < chars.len() && b < chars.len() {
        chars.swap(a, b);
    }
}

/// Deterministically obfuscate a numeric seed (a phone number, an id) into a
/// letter string prefixed with `mt`. Without a seed the current unix time is used.
pub fn unique_string(seed: Option<&str>) -> String {
    let seed = match seed {
        Some(s) => s.to_string(),
        None => chrono::Utc::now().timestamp().to_string(),
    };
    let mapped: Vec<char> = strtr(&seed, "1234567890", "huvtwkaemx").chars().collect();

    // Reverse, slipping two extra letters in after positions 9 and 5.
    let mut mixed: Vec<char> = Vec::with_capacity(mapped.len() + 2);
    for i in (0..mapped.len()).rev() {
        mixed.push(mapped[i]);
        if i == 9 {
            if let Some(&c) = mapped.get(3) {
                mixed.push(c);
            }
        }
        if i == 5 {
            if let Some(&c) = mapped.get(10) {
                mixed.push(c);
            }
        }
    }

    format!("mt{}", mixed.into_iter().collect::<String>())
}

/// A ten digit number derived from the current timestamp with a random lead digit.
pub fn unique_number() -> String {
    let timestamp = chrono::Utc::now().timestamp().to_string();
    let lead = rand::thread_rng().gen_range(1..=8);
    let mut digits: Vec<char> = format!("{}{}", lead, &timestamp[1..]).chars().collect();

    swap_if_present(&mut digits, 1, 9);
    swap_if_present(&mut digits, 2, 7);
    swap_if_present(&mut digits, 4, 6);

    digits.into_iter().collect()
}

pub fn create_nonce_str(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| NONCE_CHARS[rng.gen_range(0..NONCE_CHARS.len())] as char)
        .collect()
}

pub fn str_shuffle(str: &str) -> String {
    let mut chars: Vec<char> = str.chars().collect();
    chars.shuffle(&mut rand::thread_rng());
    chars.into_iter().collect()
}
