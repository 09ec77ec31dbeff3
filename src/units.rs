#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct ColumnsCount(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct NodesCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct EdgesCount(pub usize);

/// Side length of something on screen, in pixels.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Pixels(pub u32);
