use sha2::{Digest, Sha256};

/// Case-insensitive fragments of known crawler and automation user agents.
const BOT_SIGNATURES: &[&str] = &[
    "bot",
    "crawl",
    "spider",
    "slurp",
    "mediapartners",
    "apis-google",
    "google favicon",
    "headless",
    "selenium",
    "phantom",
];

/// Lowercase hex SHA-256 digest of `text`.
pub fn hash_text(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// A missing or empty user agent counts as a bot.
pub fn is_bot(user_agent: Option<&str>) -> bool {
    match user_agent {
        None => true,
        Some(agent) if agent.is_empty() => true,
        Some(agent) => {
            let agent = agent.to_lowercase();
            BOT_SIGNATURES
                .iter()
                .any(|signature| agent.contains(signature))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_stable_hex_sha256() {
        assert_eq!(
            hash_text("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash_text("127.0.0.1").len(), 64);
        assert_eq!(hash_text("127.0.0.1"), hash_text("127.0.0.1"));
    }

    #[test]
    fn flags_crawlers_regardless_of_case() {
        for agent in [
            "Googlebot/2.1 (+http://www.google.com/bot.html)",
            "Mozilla/5.0 (compatible; Yahoo! Slurp)",
            "Baiduspider",
            "facebookexternalhit CRAWLER",
            "Mediapartners-Google",
            "APIs-Google (+https://developers.google.com/webmasters/APIs-Google.html)",
            "Google Favicon",
            "Mozilla/5.0 HeadlessChrome/120.0",
            "Selenium WebDriver",
            "PhantomJS/2.1.1",
        ] {
            assert!(is_bot(Some(agent)), "expected bot: {}", agent);
        }
    }

    #[test]
    fn empty_or_missing_agent_is_a_bot() {
        assert!(is_bot(None));
        assert!(is_bot(Some("")));
    }

    #[test]
    fn regular_browsers_are_not_bots() {
        assert!(!is_bot(Some(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36"
        )));
        assert!(!is_bot(Some("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)")));
    }
}
