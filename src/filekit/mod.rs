//! File, directory and path helpers.

mod archive;
mod binary;
mod dir;
mod file;
mod info;
mod path;

pub use archive::{zip_directory, zip_open};
pub use binary::{pack, unpack, ByteOrder, Packable};
pub use dir::{delete_dir_or_file, dir_exists, ensure_dir_exists, get_parent_dir, mk_dir};
pub use file::{
    add_content_above_line, add_content_under_line, copy_file, copy_files, create_path,
    delete_file, file_append_content, file_exist, file_get_contents, file_put_contents, move_dir,
    move_files, rename,
};
pub use info::{
    chmod, copy, fgetcsv, filesize, is_image, is_readable, is_writeable, stat, touch, FileStat,
};
pub use path::{
    basename, dir, get_suffix, getwd, glob, is_dir, is_file, path_exists, pathinfo, realpath,
    scandir, PathInfo, PathInfoFlags,
};
