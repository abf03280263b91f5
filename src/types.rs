//! ABI types shared with the kernel (architecture-independent layout)

use bitflags::bitflags;

// ============================================================================
// Time structures
// ============================================================================

/// (seconds, nanoseconds) pair, as used by `struct stat` and `clock_gettime`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timespec {
    pub sec: i64,
    pub nano: i64,
}

impl Timespec {
    pub const fn new(sec: i64, nano: i64) -> Self {
        Self { sec, nano }
    }

    /// Total nanoseconds
    pub const fn as_nanos(&self) -> i128 {
        self.sec as i128 * 1_000_000_000 + self.nano as i128
    }
}

// ============================================================================
// File status
// ============================================================================

/// Linux x86-64 `struct stat`
///
/// Only meaningful after `sys_stat` returned a non-negative value; on failure
/// the contents are whatever the caller put there.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileStat {
    /// ID of device containing file
    pub device: u64,
    /// Inode number
    pub inode: u64,
    /// Number of hard links
    pub num_links: u64,
    /// File type and mode
    pub mode: u32,
    /// User ID of owner
    pub user_id: u32,
    /// Group ID of owner
    pub group_id: u32,
    /// ABI padding, carries nothing
    pub padding: u32,
    /// Device ID (if special file)
    pub r_device: u64,
    /// Total size in bytes
    pub size: i64,
    /// Block size for filesystem I/O
    pub block_size: i64,
    /// Number of 512B blocks allocated
    pub num_blocks: i64,
    /// Time of last access
    pub access_time: Timespec,
    /// Time of last modification
    pub mod_time: Timespec,
    /// Time of last status change
    pub status_change_time: Timespec,
    /// Reserved by the kernel; copied as-is, never read
    pub reserved: [i64; 3],
}

const _: () = {
    use core::mem::{offset_of, size_of};
    assert!(size_of::<FileStat>() == 144);
    assert!(offset_of!(FileStat, mode) == 24);
    assert!(offset_of!(FileStat, padding) == 36);
    assert!(offset_of!(FileStat, r_device) == 40);
    assert!(offset_of!(FileStat, size) == 48);
    assert!(offset_of!(FileStat, access_time) == 72);
    assert!(offset_of!(FileStat, reserved) == 120);
};

/// File type decoded from `FileStat::mode`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
    Fifo,
    CharDevice,
    Directory,
    BlockDevice,
    Regular,
    Symlink,
    Socket,
    Unknown,
}

impl FileStat {
    pub const fn zeroed() -> Self {
        Self {
            device: 0,
            inode: 0,
            num_links: 0,
            mode: 0,
            user_id: 0,
            group_id: 0,
            padding: 0,
            r_device: 0,
            size: 0,
            block_size: 0,
            num_blocks: 0,
            access_time: Timespec::new(0, 0),
            mod_time: Timespec::new(0, 0),
            status_change_time: Timespec::new(0, 0),
            reserved: [0; 3],
        }
    }

    pub const fn file_type(&self) -> FileType {
        match self.mode & S_IFMT {
            S_IFIFO => FileType::Fifo,
            S_IFCHR => FileType::CharDevice,
            S_IFDIR => FileType::Directory,
            S_IFBLK => FileType::BlockDevice,
            S_IFREG => FileType::Regular,
            S_IFLNK => FileType::Symlink,
            S_IFSOCK => FileType::Socket,
            _ => FileType::Unknown,
        }
    }

    pub const fn is_file(&self) -> bool {
        matches!(self.file_type(), FileType::Regular)
    }

    pub const fn is_dir(&self) -> bool {
        matches!(self.file_type(), FileType::Directory)
    }

    /// Permission bits (including setuid/setgid/sticky)
    pub const fn permissions(&self) -> u32 {
        self.mode & 0o7777
    }
}

// File type bits in st_mode
pub const S_IFMT: u32 = 0o170000;
pub const S_IFSOCK: u32 = 0o140000;
pub const S_IFLNK: u32 = 0o120000;
pub const S_IFREG: u32 = 0o100000;
pub const S_IFBLK: u32 = 0o060000;
pub const S_IFDIR: u32 = 0o040000;
pub const S_IFCHR: u32 = 0o020000;
pub const S_IFIFO: u32 = 0o010000;

// ============================================================================
// Standard descriptors and open flags
// ============================================================================

pub const STDIN_FILENO: u64 = 0;
pub const STDOUT_FILENO: u64 = 1;
pub const STDERR_FILENO: u64 = 2;

pub const O_RDONLY: u32 = 0;
pub const O_WRONLY: u32 = 1;
pub const O_RDWR: u32 = 2;
pub const O_CREAT: u32 = 0o100;
pub const O_EXCL: u32 = 0o200;
pub const O_TRUNC: u32 = 0o1000;
pub const O_APPEND: u32 = 0o2000;
pub const O_NONBLOCK: u32 = 0o4000;
pub const O_DIRECTORY: u32 = 0o200000;
pub const O_CLOEXEC: u32 = 0o2000000;

// ============================================================================
// Memory mapping
// ============================================================================

pub const PROT_NONE: u32 = 0;
pub const PROT_READ: u32 = 0x1;
pub const PROT_WRITE: u32 = 0x2;

pub const MAP_SHARED: u32 = 0x01;
pub const MAP_PRIVATE: u32 = 0x02;
pub const MAP_ANONYMOUS: u32 = 0x20;

bitflags! {
    /// Page protection, as taken by [`crate::mem::map`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Prot: u32 {
        const READ = PROT_READ;
        const WRITE = PROT_WRITE;
    }
}

bitflags! {
    /// Mapping flags, as taken by [`crate::mem::map`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MapFlags: u32 {
        const SHARED = MAP_SHARED;
        const PRIVATE = MAP_PRIVATE;
        const ANONYMOUS = MAP_ANONYMOUS;
    }
}
