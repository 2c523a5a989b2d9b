use super::Challenge;
use crate::error::{Error, Result};

pub struct Puzzle;

/// A finite window onto an infinite image. Everything outside the window has
/// the `background` value.
#[derive(Debug, Clone)]
struct Image {
    pixels: Vec<bool>,
    width: usize,
    height: usize,
    background: bool,
}

impl Image {
    fn get(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return self.background;
        }
        self.pixels[y as usize * self.width + x as usize]
    }

    /// Applies the enhancement algorithm once, growing the window by one pixel
    /// on every side.
    fn enhance(&self, algorithm: &[bool; 512]) -> Image {
        let (width, height) = (self.width + 2, self.height + 2);
        let mut pixels = Vec::with_capacity(width * height);
        for y in -1..=self.height as isize {
            for x in -1..=self.width as isize {
                let mut index = 0;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        index = index << 1 | usize::from(self.get(x + dx, y + dy));
                    }
                }
                pixels.push(algorithm[index]);
            }
        }
        let background = if self.background {
            algorithm[511]
        } else {
            algorithm[0]
        };
        Image {
            pixels,
            width,
            height,
            background,
        }
    }

    fn lit(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }
}

fn pixel(c: char) -> Result<bool> {
    match c {
        '#' => Ok(true),
        '.' => Ok(false),
        other => Err(Error::malformed(format!("bad pixel {other:?}"))),
    }
}

fn parse(input: &str) -> Result<([bool; 512], Image)> {
    let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());
    let algorithm = lines
        .next()
        .ok_or_else(|| Error::malformed("missing enhancement algorithm"))?
        .chars()
        .map(pixel)
        .collect::<Result<Vec<_>>>()?;
    let algorithm: [bool; 512] = algorithm.try_into().map_err(|a: Vec<bool>| {
        Error::malformed(format!("algorithm has {} entries, expected 512", a.len()))
    })?;

    let mut pixels = Vec::new();
    let (mut width, mut height) = (0, 0);
    for line in lines {
        if height == 0 {
            width = line.len();
        } else if line.len() != width {
            return Err(Error::malformed("image rows differ in length"));
        }
        for c in line.chars() {
            pixels.push(pixel(c)?);
        }
        height += 1;
    }
    let image = Image {
        pixels,
        width,
        height,
        background: false,
    };
    Ok((algorithm, image))
}

fn lit_after(input: &str, steps: usize) -> Result<usize> {
    let (algorithm, mut image) = parse(input)?;
    for _ in 0..steps {
        image = image.enhance(&algorithm);
    }
    if image.background {
        return Err(Error::NoSolution("infinitely many pixels are lit".into()));
    }
    Ok(image.lit())
}

impl Challenge for Puzzle {
    fn challenge1(&self, input: &str) -> Result<String> {
        Ok(lit_after(input, 2)?.to_string())
    }

    fn challenge2(&self, input: &str) -> Result<String> {
        Ok(lit_after(input, 50)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: &str = "#..#.\n#....\n##..#\n..#..\n..###\n";

    const EXAMPLE: &str = concat!(
        "..#.#..#####.#.#.#.###.##.....###.##.#..###.####..#####..#....#..#..##..##",
        "#..######.###...####..#..#####..##..#.#####...##.#.#..#.##..#.#......#.###",
        ".######.###.####...#.##.##..#..#..#####.....#.#....###..#.##......#.....#.",
        ".#..#..##..#...##.######.####.####.#.#...#.......#..#.#.#...####.##.#.....",
        ".#..#...##.#.##..#...##.#.##..###.#......#.#.......#.#.#.####.###.##...#..",
        "...####.#..#..#.##.#....##..#.####....##...##..#...#......#.#.......#.....",
        "..##..####..#...#.#.#...##..#.#..###..#####........#..####......#..#",
        "\n\n#..#.\n#....\n##..#\n..#..\n..###\n",
    );

    #[test]
    fn example() {
        assert_eq!(Puzzle.challenge1(EXAMPLE).unwrap(), "35");
        assert_eq!(Puzzle.challenge2(EXAMPLE).unwrap(), "3351");
    }

    /// Builds an algorithm line from a rule over the 9-bit neighbourhood index.
    fn algorithm(rule: impl Fn(usize) -> bool) -> String {
        (0..512).map(|i| if rule(i) { '#' } else { '.' }).collect()
    }

    #[test]
    fn identity_keeps_the_image() {
        let input = format!("{}\n\n{}", algorithm(|i| i & 0b10000 != 0), IMAGE);
        assert_eq!(Puzzle.challenge1(&input).unwrap(), "10");
        assert_eq!(Puzzle.challenge2(&input).unwrap(), "10");
    }

    #[test]
    fn flickering_background_is_tracked() {
        // Inverts the centre pixel, so the infinite background flips every
        // step and an even number of steps restores the original image.
        let input = format!("{}\n\n{}", algorithm(|i| i & 0b10000 == 0), IMAGE);
        assert_eq!(Puzzle.challenge1(&input).unwrap(), "10");
        assert_eq!(Puzzle.challenge2(&input).unwrap(), "10");
    }

    #[test]
    fn single_step_of_inversion_lights_the_plane() {
        let input = format!("{}\n\n{}", algorithm(|i| i & 0b10000 == 0), IMAGE);
        assert!(matches!(lit_after(&input, 1), Err(Error::NoSolution(_))));
    }

    #[test]
    fn short_algorithm() {
        assert!(matches!(
            Puzzle.challenge1("#.#\n\n#\n"),
            Err(Error::Malformed(_))
        ));
    }
}
