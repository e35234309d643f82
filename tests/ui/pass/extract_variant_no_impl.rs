use shape_macros::extract_variant;

#[extract_variant(no_impl)]
enum Shape {
    Circle { radius: f32 },
    Square { size: f32 },
}

// Without the generated impls, these are free to write by hand.
impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}
impl From<Square> for Shape {
    fn from(square: Square) -> Self {
        Shape::Square(square)
    }
}

fn main() {
    let shapes = [
        Shape::from(Circle { radius: 1.0 }),
        Shape::from(Square { size: 2.0 }),
    ];
    for shape in shapes {
        match shape {
            Shape::Circle(Circle { radius }) => assert_eq!(radius, 1.0),
            Shape::Square(Square { size }) => assert_eq!(size, 2.0),
        }
    }
}
