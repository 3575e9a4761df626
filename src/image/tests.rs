use super::*;
use Color as C;

fn mkimage<const W: usize, const H: usize>(data: [[Color; W]; H]) -> Image {
    let data = data
        .into_iter()
        .flat_map(|row| row.into_iter())
        .flat_map(|col| col.0)
        .collect::<Vec<_>>();
    Image::from_rgba8(W as u32, H as u32, &data)
}

fn count(image: &Image, color: Color) -> usize {
    let mut n = 0;
    for y in 0..image.height() {
        for x in 0..image.width() {
            if image.get(x, y) == color {
                n += 1;
            }
        }
    }
    n
}

#[test]
fn from_rgba8_layout() {
    let image = mkimage([[C::RED, C::GREEN], [C::BLUE, C::WHITE]]);
    assert_eq!(image.width(), 2);
    assert_eq!(image.height(), 2);
    assert_eq!(image.get(0, 0), C::RED);
    assert_eq!(image.get(1, 0), C::GREEN);
    assert_eq!(image.get(0, 1), C::BLUE);
    assert_eq!(image.get(1, 1), C::WHITE);
}

#[test]
#[should_panic(expected = "incorrect buffer size")]
fn from_rgba8_wrong_size() {
    Image::from_rgba8(2, 2, &[0; 12]);
}

#[test]
fn clear() {
    let mut image = Image::new(3, 2);
    assert_eq!(count(&image, C::NULL), 6);
    image.clear(C::WHITE);
    assert_eq!(count(&image, C::WHITE), 6);
}

#[test]
fn float_colors() {
    assert_eq!(Color::from_rgb_f64(1.0, 0.0, 0.0), C::RED);
    assert_eq!(Color::from_rgb_f64(2.0, -1.0, 1.0), Color::from_rgb8(255, 0, 255));
    assert_eq!(Color::from_rgb_f64(0.5, 0.5, 0.5), Color::from_rgb8(128, 128, 128));
    assert_eq!(format!("{:?}", C::RED.with_alpha(0x80)), "#ff000080");
}

#[test]
fn draw_horizontal_line() {
    let mut image = Image::new(5, 3);
    image.clear(C::WHITE);
    draw::line(&mut image, 0, 1, 4, 1).color(C::RED);
    for x in 0..5 {
        assert_eq!(image.get(x, 1), C::RED);
        assert_eq!(image.get(x, 0), C::WHITE);
        assert_eq!(image.get(x, 2), C::WHITE);
    }
}

#[test]
fn draw_out_of_bounds_is_clipped() {
    let mut image = Image::new(4, 4);
    image.clear(C::WHITE);
    draw::line(&mut image, -10, 2, 20, 2).color(C::BLUE);
    draw::dot(&mut image, 100, 100, 9).color(C::RED);
    draw::marker(&mut image, -5, -5).size(3);
    assert_eq!(count(&image, C::BLUE), 4);
    assert_eq!(count(&image, C::RED), 0);
}

#[test]
fn dot_is_filled() {
    let mut image = Image::new(11, 11);
    image.clear(C::WHITE);
    draw::dot(&mut image, 5, 5, 7).color(C::GREEN);
    assert_eq!(image.get(5, 5), C::GREEN);
    assert_eq!(image.get(0, 0), C::WHITE);

    let mut outline = Image::new(11, 11);
    outline.clear(C::WHITE);
    draw::circle(&mut outline, 5, 5, 7).color(C::GREEN);
    assert_eq!(outline.get(5, 5), C::WHITE);
    assert!(count(&outline, C::GREEN) > 0);
    assert!(count(&outline, C::GREEN) < count(&image, C::GREEN));
}

#[test]
fn marker_shape() {
    let mut image = Image::new(5, 5);
    draw::marker(&mut image, 2, 2).color(C::RED).size(3);
    // An X through the center.
    for (x, y) in [(1, 1), (2, 2), (3, 3), (3, 1), (1, 3)] {
        assert_eq!(image.get(x, y), C::RED);
    }
    assert_eq!(image.get(2, 1), C::NULL);
    assert_eq!(count(&image, C::RED), 5);
}

#[test]
#[should_panic(expected = "uneven")]
fn marker_even_size() {
    let mut image = Image::new(5, 5);
    draw::marker(&mut image, 2, 2).size(4);
}

#[test]
fn arrow_reaches_its_tip() {
    let mut image = Image::new(40, 20);
    image.clear(C::WHITE);
    draw::arrow(
        &mut image,
        nalgebra::Vector2::new(2.0, 10.0),
        nalgebra::Vector2::new(35.0, 10.0),
    )
    .color(C::RED)
    .head_length(8.0);
    assert_eq!(image.get(2, 10), C::RED);
    assert_eq!(image.get(20, 10), C::RED);
    assert_eq!(image.get(33, 10), C::RED);
    // The head is wider than the shaft.
    assert_eq!(image.get(28, 11), C::RED);
    assert_eq!(image.get(10, 12), C::WHITE);
}

#[test]
fn degenerate_arrow_draws_nothing() {
    let mut image = Image::new(8, 8);
    let p = nalgebra::Vector2::new(4.0, 4.0);
    draw::arrow(&mut image, p, p).color(C::RED);
    assert_eq!(count(&image, C::RED), 0);
}

#[test]
fn text_draws_something() {
    let mut image = Image::new(40, 20);
    image.clear(C::WHITE);
    draw::text(&mut image, 20, 10, "x").color(C::BLACK);
    assert!(count(&image, C::BLACK) > 0);
}

#[test]
fn save_rejects_unknown_extension() {
    let image = Image::new(1, 1);
    let err = image.save("frame.jpg").unwrap_err();
    assert!(err.to_string().contains("frame.jpg"), "{err}");
}
