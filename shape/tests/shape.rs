use shape::ffi::RawShape;
use shape::{Circle, Shape, ShapeError, ShapeTag, Square, Tagged, VariantMismatch};

const VALUES: [f32; 10] = [
    0.0,
    -0.0,
    2.5,
    -1.5,
    f32::MIN_POSITIVE,
    1.4e-45, // subnormal
    f32::MAX,
    f32::INFINITY,
    f32::NEG_INFINITY,
    f32::NAN,
];

fn describe(shape: Shape) -> &'static str {
    match shape {
        Shape::Circle(_) => "circle",
        Shape::Square(_) => "square",
    }
}

#[test]
fn circle_round_trip_is_bit_exact() {
    for radius in VALUES {
        let shape = Shape::circle(radius);
        assert_eq!(shape.discriminant(), ShapeTag::Circle);
        let circle = shape.as_circle().unwrap();
        assert_eq!(circle.radius.to_bits(), radius.to_bits());
    }
}

#[test]
fn square_round_trip_is_bit_exact() {
    for size in VALUES {
        let shape = Shape::square(size);
        assert_eq!(shape.discriminant(), ShapeTag::Square);
        let square = shape.as_square().unwrap();
        assert_eq!(square.size.to_bits(), size.to_bits());
    }
}

#[test]
fn wrong_payload_is_an_error() {
    assert_eq!(
        Shape::circle(1.0).as_square(),
        Err(ShapeError::VariantMismatch(VariantMismatch {
            expected: ShapeTag::Square,
            found: ShapeTag::Circle,
        }))
    );
    assert!(matches!(
        Shape::square(1.0).as_circle(),
        Err(ShapeError::VariantMismatch(_))
    ));
}

#[test]
fn variants_never_compare_equal() {
    assert_ne!(Shape::circle(5.0), Shape::square(5.0));
    assert_ne!(Shape::circle(0.0), Shape::square(0.0));
    assert_eq!(Shape::circle(5.0), Shape::circle(5.0));
}

#[test]
fn circle_and_square_scenario() {
    let circle = Shape::circle(2.5);
    assert_eq!(circle.discriminant(), ShapeTag::Circle);
    assert_eq!(circle.as_circle(), Ok(Circle { radius: 2.5 }));
    assert!(circle.is_circle());
    assert!(!circle.is_square());
    assert_eq!(describe(circle), "circle");

    let square = Shape::square(4.0);
    assert_eq!(square.discriminant(), ShapeTag::Square);
    assert_eq!(square.as_square(), Ok(Square { size: 4.0 }));
    assert!(!square.is_circle());
    assert!(square.is_square());
    assert_eq!(describe(square), "square");
}

#[test]
fn discriminant_agrees_with_tag() {
    for shape in [Shape::circle(1.0), Shape::square(1.0)] {
        assert_eq!(shape.discriminant(), shape.tag());
    }
}

#[test]
fn raw_round_trip() {
    for shape in VALUES
        .iter()
        .flat_map(|&value| [Shape::circle(value), Shape::square(value)])
    {
        let back = Shape::try_from(RawShape::from(shape)).unwrap();
        assert_eq!(back.discriminant(), shape.discriminant());
        let bits = |shape: Shape| match shape {
            Shape::Circle(Circle { radius }) => radius.to_bits(),
            Shape::Square(Square { size }) => size.to_bits(),
        };
        assert_eq!(bits(back), bits(shape));
    }
}

#[test]
fn shared_across_threads() {
    fn assert_plain<T: Copy + Send + Sync + 'static>() {}
    assert_plain::<Shape>();
    assert_plain::<Circle>();
    assert_plain::<Square>();
    assert_plain::<ShapeTag>();
    assert_plain::<RawShape>();

    let shape = Shape::circle(1.0);
    let seen = std::thread::spawn(move || shape.as_circle())
        .join()
        .unwrap();
    assert_eq!(seen, Ok(Circle { radius: 1.0 }));
}
