fn main()
{
    terminal_arcade::games::run_binary("snake")
}
