/// Shorten an account address for display: `0x1234...abcd`.
///
/// `chars` is the number of characters kept on each side after the `0x`
/// prefix. Addresses short enough to show whole are returned unchanged.
pub fn shorten_address(address: Option<&str>, chars: usize) -> String {
    let Some(address) = address.filter(|a| !a.is_empty()) else {
        return String::new();
    };

    let len = address.chars().count();
    if len <= chars * 2 + 2 {
        return address.to_string();
    }

    let prefix: String = address.chars().take(chars + 2).collect();
    let suffix: String = address.chars().skip(len - chars).collect();
    format!("{prefix}...{suffix}")
}
