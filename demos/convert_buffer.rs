use eolify_utf16::{Converter, LineEnding, Strategy};

fn utf16le(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xff, 0xfe];
    bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    bytes
}

fn main() {
    let text = "Line one\r\nLine two\r\nLine three";
    let input = utf16le(text);
    println!("Before: {input:02x?}");

    let strategy = Strategy::select(Some(LineEnding::Windows), Some(LineEnding::Unix));
    let output = Converter::new(strategy, false).convert(&input);
    println!("After:  {output:02x?}");

    let swapped = Converter::new(Strategy::Identity, true).convert(&output);
    println!("Swapped to big-endian: {swapped:02x?}");
}
