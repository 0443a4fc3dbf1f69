//! Top-domain table loader
//!
//! Reads ranked domain lists such as the Umbrella or Tranco top-1m CSV
//! (`rank,domain` per line). Lines without a rank column are ranked by their
//! position in the file.

use cf_core::TopDomains;

/// Load every domain ranked within `limit`.
pub fn parse_top_domains(text: &str, limit: usize) -> TopDomains {
    let mut table = TopDomains::new();
    let mut position = 0usize;

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        position += 1;

        let (rank, domain) = match line.split_once(',') {
            Some((rank, domain)) => match rank.trim().parse::<usize>() {
                Ok(rank) => (rank, domain),
                Err(_) => {
                    log::warn!("top domains line {}: invalid rank '{}'", index + 1, rank.trim());
                    continue;
                }
            },
            None => (position, line),
        };

        let domain = domain.trim().trim_end_matches('.').to_lowercase();
        if domain.is_empty() {
            log::warn!("top domains line {}: missing domain", index + 1);
            continue;
        }

        if rank <= limit {
            table.insert(domain, rank);
        }
    }

    log::debug!("loaded {} top domains (limit {})", table.len(), limit);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::TopDomainOracle;

    #[test]
    fn reads_ranked_csv() {
        let top = parse_top_domains("1,google.com\n2,Facebook.com\n3,example.org.\n", 10);
        assert_eq!(top.len(), 3);
        assert_eq!(top.rank("facebook.com"), Some(2));
        assert_eq!(top.rank("example.org"), Some(3));
    }

    #[test]
    fn stops_at_limit() {
        let top = parse_top_domains("1,a.com\n2,b.com\n3,c.com\n", 2);
        assert!(top.contains("b.com", 2));
        assert_eq!(top.rank("c.com"), None);
    }

    #[test]
    fn plain_lists_are_ranked_by_position() {
        let top = parse_top_domains("a.com\n\nb.com\nc.com\n", 2);
        assert_eq!(top.rank("a.com"), Some(1));
        assert_eq!(top.rank("b.com"), Some(2));
        assert_eq!(top.rank("c.com"), None);
    }

    #[test]
    fn skips_malformed_lines() {
        let top = parse_top_domains("rank,domain\n1,a.com\n2,\nx,b.com\n3,c.com\n", 100);
        assert_eq!(top.len(), 2);
        assert_eq!(top.rank("a.com"), Some(1));
        assert_eq!(top.rank("c.com"), Some(3));
    }
}
