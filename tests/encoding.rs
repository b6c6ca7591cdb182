use icon_writer::chunk::{IDAT, IEND, IHDR};
use icon_writer::decoder::read_chunks;
use icon_writer::{decode, encode, encode_icon, EncodingError, IconColours, Rgb, SIGNATURE};

const SIZES: [i64; 5] = [48, 72, 96, 144, 192];

#[test]
fn test_output_starts_with_signature() {
    for size in [1, 2, 4, 7, 48] {
        let bytes = encode(size, Rgb::MATERIAL_BLUE, Rgb::WHITE).unwrap();
        assert_eq!(&bytes[..8], &SIGNATURE);
    }
}

#[test]
fn test_header_dimensions_match_size() {
    for size in SIZES {
        let image = decode(&encode(size, Rgb::MATERIAL_BLUE, Rgb::WHITE).unwrap()).unwrap();
        assert_eq!(image.width as i64, size);
        assert_eq!(image.height as i64, size);
        assert_eq!(image.bit_depth, 8);
        assert_eq!(image.colour_type.get_code(), 6);
    }
}

#[test]
fn test_chunk_order_and_crcs() {
    let bytes = encode(96, Rgb::MATERIAL_BLUE, Rgb::WHITE).unwrap();
    let chunks = read_chunks(&bytes[8..]).unwrap();

    let kinds: Vec<[u8; 4]> = chunks.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, [IHDR, IDAT, IEND]);
    assert_eq!(chunks[0].size, 13);
    assert_eq!(chunks[2].size, 0);
    for chunk in &chunks {
        assert_eq!(chunk.crc, crc32fast::hash(&[&chunk.kind[..], chunk.data()].concat()));
    }
}

#[test]
fn test_pixel_buffer_length() {
    for size in [1u32, 5, 48] {
        let bytes = encode(size.into(), Rgb::BLACK, Rgb::WHITE).unwrap();
        let chunks = read_chunks(&bytes[8..]).unwrap();

        let mut inflated = Vec::new();
        let mut decoder = libflate::zlib::Decoder::new(chunks[1].data()).unwrap();
        std::io::Read::read_to_end(&mut decoder, &mut inflated).unwrap();

        let size = size as usize;
        assert_eq!(inflated.len(), size * size * 4 + size);
    }
}

#[test]
fn test_size_four_layout() {
    let image = decode(&encode(4, Rgb::BLACK, Rgb::WHITE).unwrap()).unwrap();
    assert_eq!(image.pixel(1, 1), Some([255, 255, 255, 255]));
    assert_eq!(image.pixel(2, 2), Some([255, 255, 255, 255]));
    assert_eq!(image.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(image.pixel(3, 1), Some([0, 0, 0, 255]));
    assert_eq!(image.pixel(1, 3), Some([0, 0, 0, 255]));
}

#[test]
fn test_inner_square_is_centered() {
    let fg = Rgb::new(10, 20, 30);
    let image = decode(&encode(48, Rgb::MATERIAL_BLUE, fg).unwrap()).unwrap();
    for y in 0..48 {
        for x in 0..48 {
            let inside = (12..36).contains(&x) && (12..36).contains(&y);
            let expected = if inside { fg } else { Rgb::MATERIAL_BLUE };
            assert_eq!(image.pixel(x, y), Some(expected.opaque()), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn test_swapped_colours() {
    let colours = IconColours::new(Rgb::BLACK, Rgb::WHITE).swapped();
    let image = decode(&encode_icon(8, &colours).unwrap()).unwrap();
    assert_eq!(image.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(image.pixel(4, 4), Some([0, 0, 0, 255]));
}

#[test]
fn test_invalid_dimension() {
    assert!(matches!(
        encode(0, Rgb::BLACK, Rgb::WHITE),
        Err(EncodingError::InvalidDimension(0))
    ));
    assert!(matches!(
        encode(-5, Rgb::BLACK, Rgb::WHITE),
        Err(EncodingError::InvalidDimension(-5))
    ));
}

#[test]
fn test_deterministic() {
    let colours = IconColours::default();
    for size in SIZES {
        assert_eq!(
            encode_icon(size, &colours).unwrap(),
            encode_icon(size, &colours).unwrap()
        );
    }
}

#[test]
fn test_concurrent_calls_agree() {
    let expected = encode(72, Rgb::MATERIAL_BLUE, Rgb::WHITE).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| encode(72, Rgb::MATERIAL_BLUE, Rgb::WHITE).unwrap()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
