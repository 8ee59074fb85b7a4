// Copyright (C) 2019-2025 Provable Inc.
// This file is part of the Mimec library.

// The Mimec library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Mimec library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Mimec library. If not, see <https://www.gnu.org/licenses/>.

use indexmap::IndexSet;

/// Parses the exception list: one MIME type per line, `#` starts a
/// comment that runs to the end of the line, blank lines are skipped.
///
/// Rules whose MIME action lands in this set are pruned from the
/// compiled tree.
pub fn parse_exceptions(source: &str) -> IndexSet<String> {
    let mut exceptions = IndexSet::new();
    for line in source.lines() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if !line.is_empty() {
            exceptions.insert(line.to_string());
        }
    }
    exceptions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exceptions() {
        let source = "\
# suppressed types
application/pdf
application/x-msdownload   # flaky on self-extracting archives

text/plain
";
        let exceptions = parse_exceptions(source);
        assert_eq!(exceptions.len(), 3);
        assert!(exceptions.contains("application/pdf"));
        assert!(exceptions.contains("application/x-msdownload"));
        assert!(exceptions.contains("text/plain"));
    }

    #[test]
    fn test_parse_exceptions_empty() {
        assert!(parse_exceptions("# nothing here\n\n").is_empty());
    }
}
